use std::fmt;
use zip::{CompressionMethod, DateTime};

/// Return the final path component (the part after the last separator).
///
/// Both `/` and `\` count as separators; a trailing separator is ignored so a
/// directory entry yields its own name.
pub fn base_name(path: &str) -> &str {
    let is_separator = |c: char| c == '/' || c == '\\';
    let trimmed = path.trim_end_matches(is_separator);
    trimmed.rsplit(is_separator).next().unwrap_or(trimmed)
}

/// Compression method of an archive entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMethod {
    Store,
    Deflate,
    /// Anything else; copied raw, never re-encoded
    Other,
}

impl From<CompressionMethod> for EntryMethod {
    fn from(method: CompressionMethod) -> Self {
        match method {
            CompressionMethod::Stored => EntryMethod::Store,
            CompressionMethod::Deflated => EntryMethod::Deflate,
            _ => EntryMethod::Other,
        }
    }
}

impl fmt::Display for EntryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryMethod::Store => "store",
            EntryMethod::Deflate => "deflate",
            EntryMethod::Other => "other",
        };
        f.write_str(name)
    }
}

/// Central directory metadata for one entry
#[derive(Debug, Clone, PartialEq)]
pub struct EntryInfo {
    /// Index in archive enumeration order
    pub index: usize,
    /// Archive-relative path, exactly as stored
    pub path: String,
    pub method: EntryMethod,
    /// Raw zip method, kept for exact comparisons
    pub compression: CompressionMethod,
    /// `None` when the stored DOS timestamp is not a valid date
    pub modified: Option<DateTime>,
    pub compressed_size: u64,
    pub size: u64,
    pub crc32: u32,
    pub is_dir: bool,
}

impl EntryInfo {
    /// Final path component
    pub fn base_name(&self) -> &str {
        base_name(&self.path)
    }
}

/// Prefix/suffix match on an entry's base name (`<prefix>*<suffix>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JarMatcher {
    prefix: String,
    suffix: String,
}

impl JarMatcher {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Case-sensitive match against the base name of `path`
    pub fn matches(&self, path: &str) -> bool {
        let name = base_name(path);
        name.len() >= self.prefix.len() + self.suffix.len()
            && name.starts_with(&self.prefix)
            && name.ends_with(&self.suffix)
    }

    /// Glob-style rendering, used in diagnostics
    pub fn pattern(&self) -> String {
        format!("{}*{}", self.prefix, self.suffix)
    }
}
