// Character entity and management

use super::anim_id::AnimId;
use super::profile::CharacterProfile;
use crate::engine::assets::AssetError;
use crate::engine::renderer::{SpriteRenderer, TextureUploader};
use crate::game::stage::StageTiming;
use glam::Vec2;

/// Unique identifier for a character
pub type CharacterId = u32;

/// Character construction errors
#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("Failed to load archive {path}: {source}")]
    Archive {
        path: String,
        #[source]
        source: AssetError,
    },
}

/// Behaviour every on-stage character provides
///
/// Dropping a character releases everything it loaded.
pub trait Character {
    /// Run one tick: sync, animate, then draw
    fn tick(
        &mut self,
        timing: &StageTiming,
        textures: &mut dyn TextureUploader,
        renderer: &mut dyn SpriteRenderer,
    );

    /// Request an animation
    fn set_anim(&mut self, anim: AnimId);

    /// Shared character state
    fn base(&self) -> &CharacterBase;

    /// Mutable shared character state
    fn base_mut(&mut self) -> &mut CharacterBase;
}

/// State shared by all characters
#[derive(Debug, Clone)]
pub struct CharacterBase {
    /// Position in stage space
    pub position: Vec2,
    /// Static character data
    pub profile: &'static CharacterProfile,
}

impl CharacterBase {
    pub fn new(profile: &'static CharacterProfile, position: Vec2) -> Self {
        Self { position, profile }
    }

    /// World-space camera focus point
    pub fn focus_point(&self) -> Vec2 {
        self.position + self.profile.focus
    }

    pub fn name(&self) -> &'static str {
        self.profile.name
    }
}

/// Owns the characters on a stage and ticks them in spawn order
#[derive(Default)]
pub struct CharacterManager<'a> {
    characters: Vec<(CharacterId, Box<dyn Character + 'a>)>,
    next_id: CharacterId,
}

impl<'a> CharacterManager<'a> {
    pub fn new() -> Self {
        Self {
            characters: Vec::new(),
            next_id: 0,
        }
    }

    /// Add a character to the stage
    pub fn spawn(&mut self, character: Box<dyn Character + 'a>) -> CharacterId {
        let id = self.next_id;
        self.next_id += 1;

        log::info!("Spawned {} as character {}", character.base().name(), id);
        self.characters.push((id, character));
        id
    }

    /// Get a character by ID
    pub fn get(&self, id: CharacterId) -> Option<&(dyn Character + 'a)> {
        self.characters
            .iter()
            .find(|(cid, _)| *cid == id)
            .map(|(_, c)| c.as_ref())
    }

    /// Get a mutable character by ID
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut (dyn Character + 'a)> {
        self.characters
            .iter_mut()
            .find(|(cid, _)| *cid == id)
            .map(|(_, c)| c.as_mut())
    }

    /// Tick every character once
    pub fn tick_all(
        &mut self,
        timing: &StageTiming,
        textures: &mut dyn TextureUploader,
        renderer: &mut dyn SpriteRenderer,
    ) {
        for (_, character) in &mut self.characters {
            character.tick(timing, textures, renderer);
        }
    }

    /// Remove a character by ID, dropping it
    pub fn remove(&mut self, id: CharacterId) -> bool {
        let before = self.characters.len();
        self.characters.retain(|(cid, _)| *cid != id);
        self.characters.len() != before
    }

    /// Get the number of characters
    pub fn count(&self) -> usize {
        self.characters.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::FIXED_UNIT;
    use crate::engine::assets::{AssetId, TextureHandle};
    use crate::engine::renderer::{DrawCommand, DrawQueue, FrameDescriptor, SourceRect};
    use crate::game::characters::profile::CharacterSpec;
    use glam::IVec2;

    static DUMMY_PROFILE: CharacterProfile = CharacterProfile {
        name: "dummy",
        archive_path: "\\CHAR\\DUMMY.ARC;1",
        pages: &[],
        focus: Vec2::new(10.0, -20.0),
        focus_zoom: FIXED_UNIT,
        health_icon: 0,
        spec: CharacterSpec::NONE,
    };

    /// Draws a fixed frame every tick; Down requests crouch it to y = 5
    struct Dummy {
        base: CharacterBase,
    }

    impl Character for Dummy {
        fn tick(
            &mut self,
            _timing: &StageTiming,
            _textures: &mut dyn TextureUploader,
            renderer: &mut dyn SpriteRenderer,
        ) {
            let frame = FrameDescriptor::new(0, SourceRect::new(0, 0, 4, 4), IVec2::ZERO);
            let texture = TextureHandle::new(AssetId::from_u64(0));
            renderer.draw(DrawCommand::for_frame(texture, &frame, self.base.position));
        }

        fn set_anim(&mut self, anim: AnimId) {
            if anim == AnimId::Down {
                self.base.position.y = 5.0;
            }
        }

        fn base(&self) -> &CharacterBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut CharacterBase {
            &mut self.base
        }
    }

    struct NoTextures;

    impl TextureUploader for NoTextures {
        fn upload(&mut self, slot: Option<TextureHandle>, _data: &[u8]) -> TextureHandle {
            slot.unwrap_or_else(|| TextureHandle::new(AssetId::from_u64(0)))
        }
    }

    fn dummy(x: f32) -> Box<Dummy> {
        Box::new(Dummy {
            base: CharacterBase::new(&DUMMY_PROFILE, Vec2::new(x, 0.0)),
        })
    }

    #[test]
    fn test_character_manager_new() {
        let manager = CharacterManager::new();
        assert_eq!(manager.count(), 0);
    }

    #[test]
    fn test_spawn_tick_remove() {
        let mut manager = CharacterManager::new();
        let a = manager.spawn(dummy(1.0));
        let b = manager.spawn(dummy(2.0));
        assert_ne!(a, b);

        let mut queue = DrawQueue::new();
        manager.tick_all(&StageTiming::default(), &mut NoTextures, &mut queue);
        let xs: Vec<f32> = queue.commands().iter().map(|c| c.position.x).collect();
        assert_eq!(xs, vec![1.0, 2.0]);

        assert!(manager.remove(a));
        assert!(!manager.remove(a));
        assert_eq!(manager.count(), 1);
        assert!(manager.get(a).is_none());
        assert_eq!(manager.get(b).unwrap().base().position.x, 2.0);
    }

    #[test]
    fn test_get_mut_forwards_set_anim() {
        let mut manager = CharacterManager::new();
        let id = manager.spawn(dummy(0.0));

        let character = manager.get_mut(id).unwrap();
        character.set_anim(AnimId::Down);
        assert_eq!(character.base().position.y, 5.0);

        character.base_mut().position.x = -3.0;
        assert_eq!(manager.get(id).unwrap().base().position, Vec2::new(-3.0, 5.0));
    }

    #[test]
    fn test_focus_point() {
        let base = CharacterBase::new(&DUMMY_PROFILE, Vec2::new(100.0, 50.0));
        assert_eq!(base.focus_point(), Vec2::new(110.0, 30.0));
        assert_eq!(base.name(), "dummy");
    }
}
