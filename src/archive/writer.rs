use crate::archive::reader::ArchiveReader;
use crate::error::{PatchError, Result};
use std::io::{Cursor, Read, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Sequential zip writer; entries appear in the order they are added
pub struct ArchiveWriter<W: Write + Seek> {
    writer: ZipWriter<W>,
    label: String,
    entry_count: usize,
}

impl ArchiveWriter<Cursor<Vec<u8>>> {
    /// Write into a growable in-memory buffer
    pub fn in_memory(label: impl Into<String>) -> Self {
        Self::new(Cursor::new(Vec::new()), label)
    }

    /// Finalize and return the archive bytes
    pub fn finish_into_bytes(self) -> Result<Vec<u8>> {
        Ok(self.finish()?.into_inner())
    }
}

impl<W: Write + Seek> ArchiveWriter<W> {
    /// Wrap a seekable sink; `label` names it in diagnostics
    pub fn new(sink: W, label: impl Into<String>) -> Self {
        Self {
            writer: ZipWriter::new(sink),
            label: label.into(),
            entry_count: 0,
        }
    }

    /// Number of entries written so far
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Add a deflate-compressed entry
    pub fn add_file(&mut self, path: &str, data: &[u8], modified: Option<DateTime>) -> Result<()> {
        self.add_file_with_compression(path, data, CompressionMethod::Deflated, modified)
    }

    /// Add a stored (uncompressed) entry
    pub fn add_stored(&mut self, path: &str, data: &[u8], modified: Option<DateTime>) -> Result<()> {
        self.add_file_with_compression(path, data, CompressionMethod::Stored, modified)
    }

    /// Add an entry with a specific compression method.
    ///
    /// A missing timestamp is written as the zip epoch (1980-01-01 00:00:00).
    pub fn add_file_with_compression(
        &mut self,
        path: &str,
        data: &[u8],
        compression: CompressionMethod,
        modified: Option<DateTime>,
    ) -> Result<()> {
        let options = SimpleFileOptions::default()
            .compression_method(compression)
            .last_modified_time(modified.unwrap_or_default());

        self.writer
            .start_file(path, options)
            .map_err(|e| self.entry_error(path, e))?;
        self.writer
            .write_all(data)
            .map_err(|e| self.entry_error(path, e))?;

        self.entry_count += 1;
        Ok(())
    }

    /// Copy entry `index` of `source` without recompressing it.
    ///
    /// Name, method, timestamp, CRC and compressed bytes are carried over as-is.
    pub fn copy_raw_from<R: Read + Seek>(
        &mut self,
        source: &mut ArchiveReader<R>,
        index: usize,
    ) -> Result<()> {
        let label = source.label().to_string();
        let file = source
            .inner_mut()
            .by_index_raw(index)
            .map_err(|e| PatchError::open(label, e))?;
        let name = file.name().to_string();

        self.writer
            .raw_copy_file(file)
            .map_err(|e| self.entry_error(&name, e))?;

        self.entry_count += 1;
        Ok(())
    }

    /// Write the central directory and hand back the sink
    pub fn finish(self) -> Result<W> {
        let label = self.label;
        self.writer
            .finish()
            .map_err(|e| PatchError::write(label, e))
    }

    fn entry_error(&self, path: &str, cause: impl std::fmt::Display) -> PatchError {
        PatchError::write(format!("{}!/{}", self.label, path), cause)
    }
}
