// Character archive (.ARC) reader and builder
//
// Layout: a table of 16-byte entries (12-byte NUL-padded name, little-endian
// u32 offset from the start of the archive) closed by an entry whose name
// starts with NUL, followed by the file data. An entry's data runs until the
// next entry's data or the end of the archive.

use super::AssetError;
use bytemuck::{Pod, Zeroable};
use log::warn;
use std::ops::Range;

/// Maximum stored length of an entry name; longer names are truncated
pub const ARCHIVE_NAME_LEN: usize = 12;

/// On-disc table entry
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct ArcEntry {
    name: [u8; ARCHIVE_NAME_LEN],
    offset: [u8; 4],
}

const ENTRY_SIZE: usize = std::mem::size_of::<ArcEntry>();

/// Names compare on their first `ARCHIVE_NAME_LEN` bytes
fn stored_name(name: &str) -> [u8; ARCHIVE_NAME_LEN] {
    let mut out = [0u8; ARCHIVE_NAME_LEN];
    let bytes = name.as_bytes();
    let len = bytes.len().min(ARCHIVE_NAME_LEN);
    out[..len].copy_from_slice(&bytes[..len]);
    out
}

/// A loaded archive; owns the raw file buffer
#[derive(Debug)]
pub struct Archive {
    data: Vec<u8>,
    entries: Vec<([u8; ARCHIVE_NAME_LEN], Range<usize>)>,
}

impl Archive {
    /// Parse the entry table of a raw archive buffer
    pub fn parse(data: Vec<u8>) -> Result<Self, AssetError> {
        let mut raw = Vec::new();
        let mut pos = 0;

        loop {
            let Some(bytes) = data.get(pos..pos + ENTRY_SIZE) else {
                return Err(AssetError::InvalidArchive(format!(
                    "entry table not terminated (ran out at byte {})",
                    pos
                )));
            };
            let entry: ArcEntry = bytemuck::pod_read_unaligned(bytes);
            if entry.name[0] == 0 {
                break;
            }

            let offset = u32::from_le_bytes(entry.offset) as usize;
            if offset > data.len() {
                return Err(AssetError::InvalidArchive(format!(
                    "entry offset {} past end of archive ({} bytes)",
                    offset,
                    data.len()
                )));
            }
            raw.push((entry.name, offset));
            pos += ENTRY_SIZE;
        }

        // Each entry ends where the next-highest offset begins
        let mut ends: Vec<usize> = raw.iter().map(|(_, offset)| *offset).collect();
        ends.push(data.len());
        ends.sort_unstable();

        let entries = raw
            .into_iter()
            .map(|(name, start)| {
                let end = ends
                    .iter()
                    .copied()
                    .find(|&end| end > start)
                    .unwrap_or(start);
                (name, start..end)
            })
            .collect();

        Ok(Self { data, entries })
    }

    /// Find an entry's data by name
    pub fn find(&self, name: &str) -> Option<&[u8]> {
        self.find_range(name).map(|range| &self.data[range])
    }

    fn find_range(&self, name: &str) -> Option<Range<usize>> {
        let key = stored_name(name);
        self.entries
            .iter()
            .find(|(entry, _)| *entry == key)
            .map(|(_, range)| range.clone())
    }

    /// Number of entries in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total size of the archive buffer
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

/// Resolves a texture page id to the bytes of that page
pub trait PageSource {
    /// Data for `page`, or `None` if the page was never resolved
    fn page_data(&self, page: u8) -> Option<&[u8]>;
}

/// An archive plus the page table resolved from it, in page id order
#[derive(Debug)]
pub struct ArchivePages {
    archive: Archive,
    pages: Vec<Option<Range<usize>>>,
}

impl ArchivePages {
    /// Look up every page name once; missing names are logged and left empty
    pub fn resolve(archive: Archive, names: &[&str]) -> Self {
        let pages = names
            .iter()
            .map(|name| {
                let range = archive.find_range(name);
                if range.is_none() {
                    warn!("Could not find \"{}\" in archive", name);
                }
                range
            })
            .collect();

        Self { archive, pages }
    }

    /// Number of page slots (resolved or not)
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of pages that were found in the archive
    pub fn resolved_count(&self) -> usize {
        self.pages.iter().filter(|page| page.is_some()).count()
    }

    pub fn archive(&self) -> &Archive {
        &self.archive
    }
}

impl PageSource for ArchivePages {
    fn page_data(&self, page: u8) -> Option<&[u8]> {
        let range = self.pages.get(page as usize)?.clone()?;
        Some(&self.archive.data[range])
    }
}

/// Builder for packing files into an archive buffer
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    files: Vec<([u8; ARCHIVE_NAME_LEN], Vec<u8>)>,
}

impl ArchiveBuilder {
    /// Create a new archive builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the archive
    pub fn add_file(mut self, name: &str, data: impl Into<Vec<u8>>) -> Self {
        self.files.push((stored_name(name), data.into()));
        self
    }

    /// Build the final archive bytes
    pub fn build(self) -> Vec<u8> {
        let table_len = (self.files.len() + 1) * ENTRY_SIZE;
        let data_len: usize = self.files.iter().map(|(_, data)| data.len()).sum();

        let mut out = Vec::with_capacity(table_len + data_len);
        let mut offset = table_len;
        for (name, data) in &self.files {
            let entry = ArcEntry {
                name: *name,
                offset: (offset as u32).to_le_bytes(),
            };
            out.extend_from_slice(bytemuck::bytes_of(&entry));
            offset += data.len();
        }
        out.extend_from_slice(bytemuck::bytes_of(&ArcEntry::zeroed()));

        for (_, data) in self.files {
            out.extend_from_slice(&data);
        }
        out
    }
}
