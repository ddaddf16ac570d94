use crate::archive::format::EntryInfo;
use crate::error::{PatchError, Result};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Read-only view over a zip archive, preserving enumeration order
pub struct ArchiveReader<R: Read + Seek> {
    archive: ZipArchive<R>,
    label: String,
}

impl ArchiveReader<BufReader<File>> {
    /// Open an archive file for reading
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let file = File::open(path).map_err(|e| PatchError::open(&label, e))?;
        Self::new(BufReader::new(file), label)
    }
}

impl ArchiveReader<Cursor<Vec<u8>>> {
    /// Decode an archive held in memory (e.g. a jar nested in another zip)
    pub fn from_bytes(data: Vec<u8>, label: impl Into<String>) -> Result<Self> {
        Self::new(Cursor::new(data), label.into())
    }
}

impl<R: Read + Seek> ArchiveReader<R> {
    /// Wrap any seekable source; `label` names it in diagnostics
    pub fn new(reader: R, label: String) -> Result<Self> {
        let archive = ZipArchive::new(reader).map_err(|e| PatchError::open(&label, e))?;
        Ok(Self { archive, label })
    }

    /// Name used for this archive in diagnostics
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get number of entries in archive
    pub fn entry_count(&self) -> usize {
        self.archive.len()
    }

    /// Metadata for the entry at `index`, without decompressing it
    pub fn entry(&mut self, index: usize) -> Result<EntryInfo> {
        let file = self
            .archive
            .by_index_raw(index)
            .map_err(|e| PatchError::open(&self.label, e))?;
        let compression = file.compression();
        Ok(EntryInfo {
            index,
            path: file.name().to_string(),
            method: compression.into(),
            compression,
            modified: file.last_modified(),
            compressed_size: file.compressed_size(),
            size: file.size(),
            crc32: file.crc32(),
            is_dir: file.is_dir(),
        })
    }

    /// Metadata for every entry, in enumeration order
    pub fn entries(&mut self) -> Result<Vec<EntryInfo>> {
        (0..self.entry_count()).map(|i| self.entry(i)).collect()
    }

    /// Decompress the entry at `index`; the CRC is checked on the way
    pub fn read_entry(&mut self, index: usize) -> Result<Vec<u8>> {
        let mut file = self
            .archive
            .by_index(index)
            .map_err(|e| PatchError::open(&self.label, e))?;

        let mut data = Vec::new();
        let name = file.name().to_string();
        file.read_to_end(&mut data).map_err(|e| {
            PatchError::open(format!("{}!/{}", self.label, name), e)
        })?;
        Ok(data)
    }

    pub(crate) fn inner_mut(&mut self) -> &mut ZipArchive<R> {
        &mut self.archive
    }
}
