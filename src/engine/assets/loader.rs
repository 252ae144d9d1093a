// Asset loading functionality

use super::AssetError;
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Something that can read whole files by disc path
///
/// Paths use the disc convention: backslash separators, an optional leading
/// backslash and an optional `;1` version suffix (e.g. `\CHAR\GFSKY.ARC;1`).
pub trait AssetSource {
    /// Read the whole file at `path`
    fn read(&mut self, path: &str) -> Result<Vec<u8>, AssetError>;
}

/// Split a disc path into its components, dropping the version suffix
fn disc_components(path: &str) -> impl Iterator<Item = &str> {
    let path = path.split_once(';').map_or(path, |(name, _version)| name);
    path.split(['\\', '/']).filter(|part| !part.is_empty())
}

/// Normalise a disc path into a `/`-joined lookup key
fn normalize(path: &str) -> String {
    disc_components(path).collect::<Vec<_>>().join("/")
}

/// Asset loader reading files from a directory mirroring the disc layout
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full filesystem path for a disc path
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        disc_components(path).fold(self.base_path.clone(), |acc, part| acc.join(part))
    }

    /// Check if an asset exists
    pub fn exists(&self, path: &str) -> bool {
        self.resolve_path(path).is_file()
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl AssetSource for AssetLoader {
    fn read(&mut self, path: &str) -> Result<Vec<u8>, AssetError> {
        let resolved = self.resolve_path(path);

        if !resolved.is_file() {
            return Err(AssetError::NotFound(resolved.to_string_lossy().to_string()));
        }

        debug!("Reading {} from {}", path, resolved.display());
        Ok(std::fs::read(&resolved)?)
    }
}

/// In-memory asset source, keyed by normalised disc path
#[derive(Debug, Default)]
pub struct MemoryAssetSource {
    files: HashMap<String, Vec<u8>>,
    reads: usize,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file under the given disc path
    pub fn insert(&mut self, path: &str, data: Vec<u8>) {
        self.files.insert(normalize(path), data);
    }

    /// Builder-style variant of [`MemoryAssetSource::insert`]
    pub fn with_file(mut self, path: &str, data: Vec<u8>) -> Self {
        self.insert(path, data);
        self
    }

    /// Number of successful reads served so far
    pub fn read_count(&self) -> usize {
        self.reads
    }
}

impl AssetSource for MemoryAssetSource {
    fn read(&mut self, path: &str) -> Result<Vec<u8>, AssetError> {
        let data = self
            .files
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))?;
        self.reads += 1;
        Ok(data)
    }
}
