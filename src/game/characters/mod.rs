// Character system
//
// This module contains everything related to on-stage characters:
// - Animation ids and the bytecode interpreter that plays them
// - Sync of animation requests to song steps or an event chart
// - The character trait, shared base state and profiles
// - Concrete characters

pub mod anim_id;
pub mod animation;
pub mod character;
pub mod gf_sky;
pub mod profile;
pub mod sync;

// Re-export commonly used types
pub use anim_id::{AnimId, ANIM_COUNT};
pub use animation::{Animatable, AnimationProgram, AnimationTable, Op};
pub use character::{Character, CharacterBase, CharacterError, CharacterId, CharacterManager};
pub use gf_sky::GfSky;
pub use profile::{CharacterProfile, CharacterSpec};
pub use sync::{SyncDispatcher, SyncMode};
