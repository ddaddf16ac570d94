//! End-to-end patch run
//!
//! The run is strictly linear: locate the jar, rewrite it, assemble the new
//! outer archive. The first failing stage ends the run and is named in the
//! returned error; nothing is written unless all three stages succeed.

use crate::archive::{
    assemble, locate_jar, output_path_for, rewrite_jar, ArchiveReader, PatchedDescriptor,
};
use crate::config::PatchConfig;
use crate::error::{PatchError, Result, Stage};
use std::path::{Path, PathBuf};
use tracing::info;

/// Summary of a successful run
#[derive(Debug, Clone)]
pub struct PatchReport {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Path of the patched jar inside the outer archive
    pub jar_path: String,
    pub descriptors: Vec<PatchedDescriptor>,
    /// Jar entries copied verbatim
    pub copied_inner: usize,
    /// Outer entries copied verbatim
    pub copied_outer: usize,
    /// Other jar-pattern matches that were skipped
    pub ignored_jars: Vec<String>,
}

/// Patch the archive at `source` and write `<stem><suffix>.zip` beside it
pub fn patch_archive(source: &Path, config: &PatchConfig) -> Result<PatchReport> {
    config.validate()?;
    if source.as_os_str().is_empty() {
        return Err(PatchError::Usage("archive path is empty".to_string()));
    }
    let output = output_path_for(source, &config.output_suffix);

    let mut reader = ArchiveReader::open(source).map_err(|e| e.at(Stage::Locate))?;
    info!(source = %source.display(), entries = reader.entry_count(), "opened archive");

    let mut jar = locate_jar(&mut reader, &config.jar_matcher(), config.require_unique_jar)
        .map_err(|e| e.at(Stage::Locate))?;
    info!(jar = %jar.path, bytes = jar.data.len(), "located plugin jar");

    let jar_bytes = std::mem::take(&mut jar.data);
    let rewritten =
        rewrite_jar(jar_bytes, &jar.path, config).map_err(|e| e.at(Stage::Rewrite))?;
    info!(
        jar = %jar.path,
        descriptors = rewritten.descriptors.len(),
        copied = rewritten.copied,
        "rewrote plugin jar"
    );

    let assembled = assemble(&mut reader, &jar, &rewritten.data, source, &output)
        .map_err(|e| e.at(Stage::Assemble))?;
    info!(output = %assembled.path.display(), copied = assembled.copied, "wrote archive");

    Ok(PatchReport {
        source: source.to_path_buf(),
        output: assembled.path,
        jar_path: jar.path,
        descriptors: rewritten.descriptors,
        copied_inner: rewritten.copied,
        copied_outer: assembled.copied,
        ignored_jars: jar.ignored_matches,
    })
}
