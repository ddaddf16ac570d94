use std::fmt;
use std::io;
use thiserror::Error;

/// Result type for patch operations
pub type Result<T> = std::result::Result<T, PatchError>;

/// Pipeline stage in which a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Opening the outer archive and selecting the plugin jar
    Locate,
    /// Rewriting the nested jar (including descriptor patching)
    Rewrite,
    /// Writing the new outer archive
    Assemble,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Locate => "locate",
            Stage::Rewrite => "rewrite",
            Stage::Assemble => "assemble",
        };
        f.write_str(name)
    }
}

/// Coarse error classes reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid invocation parameter or configuration
    Usage,
    /// Source or nested archive cannot be opened or decoded
    Open,
    /// No matching jar, no descriptor, or a strict-mode match failure
    NotFound,
    /// Creating or writing the output archive failed
    Write,
}

/// Unified error type for all patch operations
#[derive(Debug, Error)]
pub enum PatchError {
    // Usage errors
    #[error("Invalid invocation: {0}")]
    Usage(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // Open errors
    #[error("Failed to open {target}: {reason}")]
    Open { target: String, reason: String },

    #[error("Descriptor {path} is not valid UTF-8")]
    InvalidDescriptor { path: String },

    // Lookup errors
    #[error("No entry matching {0} found in archive")]
    JarNotFound(String),

    #[error("Multiple entries match {pattern}: {}", .paths.join(", "))]
    AmbiguousJar { pattern: String, paths: Vec<String> },

    #[error("No {name} found in {jar}")]
    DescriptorNotFound { name: String, jar: String },

    #[error("Closing tag {tag} not found in {path}")]
    ClosingTagMissing { tag: String, path: String },

    // Write errors
    #[error("Failed to write {target}: {reason}")]
    Write { target: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // Stage wrapper
    #[error("{stage} stage failed")]
    Failed {
        stage: Stage,
        #[source]
        source: Box<PatchError>,
    },
}

impl PatchError {
    /// Build an [`PatchError::Open`] from any displayable cause
    pub fn open(target: impl Into<String>, reason: impl fmt::Display) -> Self {
        PatchError::Open {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`PatchError::Write`] from any displayable cause
    pub fn write(target: impl Into<String>, reason: impl fmt::Display) -> Self {
        PatchError::Write {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    /// Tag this error with the stage it escaped from.
    ///
    /// Errors that already carry a stage are returned as-is.
    pub fn at(self, stage: Stage) -> Self {
        match self {
            PatchError::Failed { .. } => self,
            other => PatchError::Failed {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Stage the error was tagged with, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PatchError::Failed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Underlying error with any stage wrapper removed
    pub fn root(&self) -> &PatchError {
        match self {
            PatchError::Failed { source, .. } => source.root(),
            other => other,
        }
    }

    /// Classify the error.
    ///
    /// A bare `Io` error is ambiguous on its own; the stage it was tagged with
    /// decides whether it counts as an open or a write failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PatchError::Usage(_) | PatchError::Config(_) => ErrorKind::Usage,
            PatchError::Open { .. } | PatchError::InvalidDescriptor { .. } => ErrorKind::Open,
            PatchError::JarNotFound(_)
            | PatchError::AmbiguousJar { .. }
            | PatchError::DescriptorNotFound { .. }
            | PatchError::ClosingTagMissing { .. } => ErrorKind::NotFound,
            PatchError::Write { .. } => ErrorKind::Write,
            PatchError::Io(_) => ErrorKind::Open,
            PatchError::Failed { stage, source } => match (stage, source.as_ref()) {
                (Stage::Assemble, PatchError::Io(_)) => ErrorKind::Write,
                (_, inner) => inner.kind(),
            },
        }
    }
}

impl From<toml::de::Error> for PatchError {
    fn from(err: toml::de::Error) -> Self {
        PatchError::Config(err.to_string())
    }
}
