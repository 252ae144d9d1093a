// Sprite frame descriptors

use glam::{IVec2, Vec2};

/// Source rectangle inside a texture page (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl SourceRect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Size of the rectangle as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w as f32, self.h as f32)
    }
}

/// One drawable pose: which texture page, where in it, and how it anchors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDescriptor {
    /// Index into the character's resolved texture pages
    pub page: u8,
    /// Region of the page to draw
    pub src: SourceRect,
    /// Anchor offset subtracted from the character position
    pub offset: IVec2,
}

impl FrameDescriptor {
    pub const fn new(page: u8, src: SourceRect, offset: IVec2) -> Self {
        Self { page, src, offset }
    }

    /// Top-left draw position for a character standing at `origin`
    pub fn draw_position(&self, origin: Vec2) -> Vec2 {
        origin - self.offset.as_vec2()
    }
}
