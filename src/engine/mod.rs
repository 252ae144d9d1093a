// Engine modules: assets, rendering seams, song timing

pub mod assets;
pub mod conductor;
pub mod renderer;
