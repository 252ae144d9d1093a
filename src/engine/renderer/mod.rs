// Rendering seams: frame data, texture upload and sprite draw submission
//
// The actual GPU backend lives outside this crate; it plugs in through the
// `TextureUploader` and `SpriteRenderer` traits.

mod frame;
mod sprite;
pub mod texture;

pub use frame::{FrameDescriptor, SourceRect};
pub use sprite::{DrawCommand, DrawQueue, SpriteRenderer};
pub use texture::{Texture, TextureManager, TextureUploader};
