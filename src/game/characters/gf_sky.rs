// GF (sky stage variant): speaker-bopping background character
//
// Dances Left/Right on the stage's step cadence, or follows the stage's event
// chart when one is provided. Texture pages are loaded from the character
// archive only when a frame on a different page is selected.

use super::anim_id::AnimId;
use super::animation::Op::{Back, ChangeAnim, Frame, Repeat};
use super::animation::{Animatable, AnimationProgram, AnimationTable};
use super::character::{Character, CharacterBase, CharacterError};
use super::profile::{CharacterProfile, CharacterSpec};
use super::sync::SyncDispatcher;
use crate::core::fixed::fixed_dec;
use crate::engine::assets::{Archive, ArchivePages, AssetError, AssetSource, TextureResidency};
use crate::engine::renderer::{
    DrawCommand, FrameDescriptor, SourceRect, SpriteRenderer, TextureUploader,
};
use crate::game::stage::{StageTiming, TimingSource};
use glam::{IVec2, Vec2};
use log::{debug, info, warn};

/// Texture page ids, in archive lookup order
pub mod page {
    pub const BOP_LEFT0: u8 = 0;
    pub const BOP_LEFT1: u8 = 1;
    pub const BOP_RIGHT0: u8 = 2;
    pub const BOP_RIGHT1: u8 = 3;
    pub const CRY: u8 = 4;
}

/// Texture page file names, indexed by page id
pub const GF_SKY_PAGES: [&str; 5] = [
    "bopleft0.tim",
    "bopleft1.tim",
    "bopright0.tim",
    "bopright1.tim",
    "cry.tim",
];

const BOP_OFFSET: IVec2 = IVec2::new(39, 160);
const CRY_OFFSET: IVec2 = IVec2::new(37, 160);
const LEFT_HALF: SourceRect = SourceRect::new(0, 0, 128, 256);
const RIGHT_HALF: SourceRect = SourceRect::new(128, 0, 256, 256);

pub static GF_SKY_FRAMES: [FrameDescriptor; 10] = [
    FrameDescriptor::new(page::BOP_LEFT0, LEFT_HALF, BOP_OFFSET), // 0 bop left 1
    FrameDescriptor::new(page::BOP_LEFT0, RIGHT_HALF, BOP_OFFSET), // 1 bop left 2
    FrameDescriptor::new(page::BOP_LEFT1, LEFT_HALF, BOP_OFFSET), // 2 bop left 3
    FrameDescriptor::new(page::BOP_LEFT1, RIGHT_HALF, BOP_OFFSET), // 3 bop left 4
    FrameDescriptor::new(page::BOP_RIGHT0, LEFT_HALF, BOP_OFFSET), // 4 bop right 1
    FrameDescriptor::new(page::BOP_RIGHT0, RIGHT_HALF, BOP_OFFSET), // 5 bop right 2
    FrameDescriptor::new(page::BOP_RIGHT1, LEFT_HALF, BOP_OFFSET), // 6 bop right 3
    FrameDescriptor::new(page::BOP_RIGHT1, RIGHT_HALF, BOP_OFFSET), // 7 bop right 4
    FrameDescriptor::new(page::CRY, LEFT_HALF, CRY_OFFSET),       // 8 cry
    FrameDescriptor::new(page::CRY, RIGHT_HALF, CRY_OFFSET),      // 9 cry
];

#[rustfmt::skip]
pub static GF_SKY_ANIMS: AnimationTable = [
    AnimationProgram::new(0, &[ChangeAnim(AnimId::Left)]), // Idle
    AnimationProgram::new(
        1,
        &[
            Frame(0), Frame(0), Frame(0), Frame(1), Frame(1), Frame(1),
            Frame(2), Frame(2), Frame(2), Frame(3), Frame(3), Frame(3),
            Back(1),
        ],
    ), // Left
    AnimationProgram::new(0, &[ChangeAnim(AnimId::Left)]), // LeftAlt
    AnimationProgram::new(2, &[Frame(8), Frame(9), Repeat]), // Down
    AnimationProgram::new(0, &[ChangeAnim(AnimId::Left)]), // DownAlt
    AnimationProgram::new(0, &[ChangeAnim(AnimId::Left)]), // Up
    AnimationProgram::new(0, &[ChangeAnim(AnimId::Left)]), // UpAlt
    AnimationProgram::new(
        1,
        &[
            Frame(4), Frame(4), Frame(4), Frame(5), Frame(5), Frame(5),
            Frame(6), Frame(6), Frame(6), Frame(7), Frame(7), Frame(7),
            Back(1),
        ],
    ), // Right
    AnimationProgram::new(0, &[ChangeAnim(AnimId::Left)]), // RightAlt
];

pub static GF_SKY_PROFILE: CharacterProfile = CharacterProfile {
    name: "gf_sky",
    archive_path: "\\CHAR\\GFSKY.ARC;1",
    pages: &GF_SKY_PAGES,
    focus: Vec2::new(16.0, -50.0),
    focus_zoom: fixed_dec(13, 10),
    health_icon: 1,
    spec: CharacterSpec::NONE,
};

/// GF on the sky stage
pub struct GfSky<'chart> {
    base: CharacterBase,
    animatable: Animatable,
    pages: ArchivePages,
    residency: TextureResidency,
    sync: SyncDispatcher<'chart>,
}

impl<'chart> GfSky<'chart> {
    /// Load the character archive and fix the timing regime
    pub fn new<S>(
        position: Vec2,
        source: &mut S,
        timing: TimingSource<'chart>,
    ) -> Result<Self, CharacterError>
    where
        S: AssetSource + ?Sized,
    {
        let profile = &GF_SKY_PROFILE;
        let archive_error = |source: AssetError| CharacterError::Archive {
            path: profile.archive_path.to_string(),
            source,
        };

        let data = source.read(profile.archive_path).map_err(archive_error)?;
        let archive = Archive::parse(data).map_err(archive_error)?;
        let pages = ArchivePages::resolve(archive, profile.pages);

        let sync = SyncDispatcher::new(timing);
        info!(
            "{} ready: {}/{} texture pages, {} sync, focus zoom {:.2}",
            profile.name,
            pages.resolved_count(),
            pages.page_count(),
            if sync.is_chart_driven() { "chart" } else { "step" },
            profile.focus_zoom_f32(),
        );

        Ok(Self {
            base: CharacterBase::new(profile, position),
            animatable: Animatable::new(&GF_SKY_ANIMS, AnimId::Idle),
            pages,
            residency: TextureResidency::new(),
            sync,
        })
    }

    pub fn animatable(&self) -> &Animatable {
        &self.animatable
    }

    pub fn residency(&self) -> &TextureResidency {
        &self.residency
    }

    pub fn pages(&self) -> &ArchivePages {
        &self.pages
    }

    pub fn sync(&self) -> &SyncDispatcher<'chart> {
        &self.sync
    }

    /// Descriptor of the frame currently shown
    pub fn current_frame(&self) -> Option<&'static FrameDescriptor> {
        self.animatable
            .frame()
            .and_then(|index| GF_SKY_FRAMES.get(index as usize))
    }
}

impl Character for GfSky<'_> {
    fn tick(
        &mut self,
        timing: &StageTiming,
        textures: &mut dyn TextureUploader,
        renderer: &mut dyn SpriteRenderer,
    ) {
        // Sync
        let animatable = &mut self.animatable;
        self.sync
            .dispatch(timing, animatable.anim(), |anim| animatable.set_anim(anim));

        // Animate; new frames pull in their texture page
        let pages = &self.pages;
        let residency = &mut self.residency;
        self.animatable.step(|index| match GF_SKY_FRAMES.get(index as usize) {
            Some(frame) => {
                residency.ensure_resident(frame, pages, &mut *textures);
            }
            None => warn!("Frame {} is not in the frame table", index),
        });

        // Draw
        if let (Some(frame), Some(texture)) = (self.current_frame(), self.residency.resident_handle())
        {
            renderer.draw(DrawCommand::for_frame(texture, frame, self.base.position));
        }
    }

    fn set_anim(&mut self, anim: AnimId) {
        self.animatable.set_anim(anim);
    }

    fn base(&self) -> &CharacterBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut CharacterBase {
        &mut self.base
    }
}

impl Drop for GfSky<'_> {
    fn drop(&mut self) {
        debug!(
            "Freeing {} archive ({} bytes, {} texture uploads)",
            self.base.name(),
            self.pages.archive().byte_len(),
            self.residency.upload_count()
        );
    }
}
