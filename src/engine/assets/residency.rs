// Texture page residency cache

use super::{PageSource, TextureHandle};
use crate::engine::renderer::{FrameDescriptor, TextureUploader};
use log::debug;

/// Tracks which texture page currently occupies a character's texture slot
///
/// The page id and the handle are always replaced together, so a resident
/// handle always holds the resident page's data.
#[derive(Debug, Default)]
pub struct TextureResidency {
    resident: Option<(u8, TextureHandle)>,
    upload_count: u64,
}

impl TextureResidency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the page `frame` needs resident, uploading only if it is not already
    ///
    /// A page that was never resolved uploads empty data.
    pub fn ensure_resident<P, U>(
        &mut self,
        frame: &FrameDescriptor,
        pages: &P,
        uploader: &mut U,
    ) -> TextureHandle
    where
        P: PageSource + ?Sized,
        U: TextureUploader + ?Sized,
    {
        if let Some((page, handle)) = self.resident {
            if page == frame.page {
                return handle;
            }
        }

        let data = pages.page_data(frame.page).unwrap_or_default();
        let slot = self.resident.map(|(_, handle)| handle);
        let handle = uploader.upload(slot, data);

        debug!(
            "Texture page {} resident ({} bytes, upload #{})",
            frame.page,
            data.len(),
            self.upload_count + 1
        );
        self.resident = Some((frame.page, handle));
        self.upload_count += 1;
        handle
    }

    /// Page currently resident, if any
    pub fn resident_page(&self) -> Option<u8> {
        self.resident.map(|(page, _)| page)
    }

    /// Handle of the resident page, if any
    pub fn resident_handle(&self) -> Option<TextureHandle> {
        self.resident.map(|(_, handle)| handle)
    }

    /// Number of uploads performed so far
    pub fn upload_count(&self) -> u64 {
        self.upload_count
    }
}
