// Core utilities shared by engine and game code

pub mod fixed;
