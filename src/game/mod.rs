// Game layer: stage context and characters

pub mod characters;
pub mod stage;
