// Asset management system
//
// Provides character archive loading and texture page residency.

mod archive;
mod handle;
mod loader;
mod residency;

pub use archive::{Archive, ArchiveBuilder, ArchivePages, PageSource, ARCHIVE_NAME_LEN};
pub use handle::{AssetHandle, AssetId, TextureAsset, TextureHandle};
pub use loader::{AssetLoader, AssetSource, MemoryAssetSource};
pub use residency::TextureResidency;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("GFSKY.ARC".to_string());
        assert_eq!(err.to_string(), "Asset not found: GFSKY.ARC");

        let err = AssetError::InvalidArchive("truncated header".to_string());
        assert_eq!(err.to_string(), "Invalid archive: truncated header");
    }
}
