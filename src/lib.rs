// Sky Speaker: bytecode-driven character sprites for a PSX-style rhythm game

pub mod core;
pub mod engine;
pub mod game;
