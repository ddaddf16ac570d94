use crate::archive::locator::LocatedJar;
use crate::archive::reader::ArchiveReader;
use crate::archive::writer::ArchiveWriter;
use crate::error::{PatchError, Result};
use std::ffi::{OsStr, OsString};
use std::io::{BufWriter, Read, Seek};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Derive the output path: strip a trailing `.zip`, append `suffix`, append `.zip`.
///
/// `/dist/plugin.zip` with suffix `k2` becomes `/dist/plugink2.zip`.
///
/// Only the file name is rewritten, so the directory part is kept byte for
/// byte even when it is not valid UTF-8.
pub fn output_path_for(input: &Path, suffix: &str) -> PathBuf {
    let file_name = input.file_name().unwrap_or_default();
    let stem = match input.extension() {
        Some(ext) if ext == "zip" => input.file_stem().unwrap_or_default(),
        _ if file_name == ".zip" => OsStr::new(""),
        _ => file_name,
    };

    let mut name = OsString::from(stem);
    name.push(suffix);
    name.push(".zip");
    input.with_file_name(name)
}

/// Outcome of writing the new outer archive
#[derive(Debug, Clone)]
pub struct AssembledArchive {
    pub path: PathBuf,
    /// Outer entries copied verbatim
    pub copied: usize,
}

/// Write the new outer archive to `output`.
///
/// The rewritten jar goes first, under its original path and timestamp, followed
/// by every other entry of `source` in order. The archive is staged in a
/// temporary file next to `output` and renamed into place only once complete;
/// on any error the temporary file is removed and `output` is left untouched.
pub fn assemble<R: Read + Seek>(
    source: &mut ArchiveReader<R>,
    jar: &LocatedJar,
    new_jar: &[u8],
    source_path: &Path,
    output: &Path,
) -> Result<AssembledArchive> {
    let target = output.display().to_string();
    if output == source_path {
        return Err(PatchError::write(&target, "output path equals the source archive"));
    }

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staging = tempfile::Builder::new()
        .prefix(".k2patch-")
        .suffix(".zip.tmp")
        .tempfile_in(dir)
        .map_err(|e| PatchError::write(&target, e))?;
    debug!(staging = %staging.path().display(), "staging output archive");

    let mut writer = ArchiveWriter::new(BufWriter::new(staging), target.clone());
    writer.add_file(&jar.path, new_jar, jar.modified)?;

    for index in 0..source.entry_count() {
        if index == jar.index {
            continue;
        }
        writer.copy_raw_from(source, index)?;
    }
    let copied = writer.entry_count() - 1;

    let staging = finish_staging(writer)?;
    staging
        .persist(output)
        .map_err(|e| PatchError::write(&target, e.error))?;

    Ok(AssembledArchive {
        path: output.to_path_buf(),
        copied,
    })
}

fn finish_staging(writer: ArchiveWriter<BufWriter<NamedTempFile>>) -> Result<NamedTempFile> {
    let buffered = writer.finish()?;
    let staging = buffered
        .into_inner()
        .map_err(|e| PatchError::Io(e.into_error()))?;
    staging.as_file().sync_all()?;
    Ok(staging)
}
