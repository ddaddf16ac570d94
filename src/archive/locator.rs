use crate::archive::format::JarMatcher;
use crate::archive::reader::ArchiveReader;
use crate::error::{PatchError, Result};
use std::io::{Read, Seek};
use tracing::{debug, warn};
use zip::DateTime;

/// The plugin jar selected from the outer archive
#[derive(Debug, Clone)]
pub struct LocatedJar {
    /// Index in the outer archive
    pub index: usize,
    /// Full path, including any directory prefix
    pub path: String,
    pub modified: Option<DateTime>,
    /// Decompressed jar bytes
    pub data: Vec<u8>,
    /// Later entries that also matched and were ignored
    pub ignored_matches: Vec<String>,
}

/// Select the first file entry whose base name matches `matcher`.
///
/// Later matches are recorded in [`LocatedJar::ignored_matches`]; with
/// `require_unique` set they fail the lookup instead.
pub fn locate_jar<R: Read + Seek>(
    reader: &mut ArchiveReader<R>,
    matcher: &JarMatcher,
    require_unique: bool,
) -> Result<LocatedJar> {
    let mut matches = reader
        .entries()?
        .into_iter()
        .filter(|entry| !entry.is_dir && matcher.matches(&entry.path));

    let first = matches
        .next()
        .ok_or_else(|| PatchError::JarNotFound(matcher.pattern()))?;
    let ignored_matches: Vec<String> = matches.map(|entry| entry.path).collect();

    if !ignored_matches.is_empty() {
        if require_unique {
            let mut paths = vec![first.path];
            paths.extend(ignored_matches);
            return Err(PatchError::AmbiguousJar {
                pattern: matcher.pattern(),
                paths,
            });
        }
        warn!(
            selected = %first.path,
            ignored = ?ignored_matches,
            "multiple entries match {}, using the first",
            matcher.pattern()
        );
    }

    debug!(jar = %first.path, index = first.index, size = first.size, "located plugin jar");
    let data = reader.read_entry(first.index)?;

    Ok(LocatedJar {
        index: first.index,
        path: first.path,
        modified: first.modified,
        data,
        ignored_matches,
    })
}
