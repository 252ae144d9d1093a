// Character profiles - compile-time description of each character
// Everything here is fixed at authoring time; nothing is loaded at runtime

use crate::core::fixed::{fixed_to_f32, Fixed};
use glam::Vec2;

/// Special behaviour flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharacterSpec(u8);

impl CharacterSpec {
    /// No special behaviour
    pub const NONE: Self = Self(0);
    /// Character has dedicated miss animations
    pub const MISS_ANIM: Self = Self(1 << 0);

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Static description of a character
#[derive(Debug, Clone)]
pub struct CharacterProfile {
    /// Name used in logs
    pub name: &'static str,
    /// Disc path of the character archive
    pub archive_path: &'static str,
    /// Texture page file names inside the archive, in page id order
    pub pages: &'static [&'static str],

    // Camera
    /// Camera focus point relative to the character position
    pub focus: Vec2,
    /// Camera zoom while focused on this character
    pub focus_zoom: Fixed,

    // HUD
    /// Health bar icon index
    pub health_icon: u8,
    /// Behaviour flags
    pub spec: CharacterSpec,
}

impl CharacterProfile {
    /// Number of texture pages the character uses
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Focus zoom as a float, for renderers that want one
    pub fn focus_zoom_f32(&self) -> f32 {
        fixed_to_f32(self.focus_zoom)
    }
}
