// Sprite draw submission

use super::frame::{FrameDescriptor, SourceRect};
use crate::engine::assets::TextureHandle;
use glam::Vec2;

/// One textured quad to draw this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Texture slot to sample from
    pub texture: TextureHandle,
    /// Region of the texture
    pub src: SourceRect,
    /// Top-left position in stage space (before camera)
    pub position: Vec2,
    /// Size in stage units
    pub size: Vec2,
}

impl DrawCommand {
    /// Build the draw for `frame` with the character standing at `origin`
    pub fn for_frame(texture: TextureHandle, frame: &FrameDescriptor, origin: Vec2) -> Self {
        Self {
            texture,
            src: frame.src,
            position: frame.draw_position(origin),
            size: frame.src.size(),
        }
    }
}

/// Consumer of per-tick sprite draws
pub trait SpriteRenderer {
    fn draw(&mut self, command: DrawCommand);
}

/// Renderer that records draws so a frame can be submitted (or inspected) later
#[derive(Debug, Default)]
pub struct DrawQueue {
    commands: Vec<DrawCommand>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws recorded since the last clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Most recent draw
    pub fn last(&self) -> Option<&DrawCommand> {
        self.commands.last()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Take all recorded draws, leaving the queue empty
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl SpriteRenderer for DrawQueue {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
