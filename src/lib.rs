//! k2patch: declare Kotlin K1/K2 plugin mode support in a packaged IntelliJ plugin
//!
//! A plugin distribution zip carries the plugin jar (`CodeLocatorPlugin*.jar`),
//! which in turn carries `plugin.xml`. This crate rewrites that descriptor in
//! place and emits a sibling zip:
//! - the jar is located by base name and decoded in memory
//! - every `plugin.xml` in it gets the `supportsKotlinPluginMode` extension block
//! - all other jar and zip entries are copied raw (same bytes, method and timestamp)
//! - the new zip is staged in a temp file and renamed into place on success
//!
//! # Example
//!
//! ```no_run
//! use k2patch::{patch_archive, PatchConfig};
//! use std::path::Path;
//!
//! let report = patch_archive(Path::new("/opt/dist/CodeLocator.zip"), &PatchConfig::default())?;
//! println!("{}", report.output.display()); // /opt/dist/CodeLocatork2.zip
//! # Ok::<(), k2patch::error::PatchError>(())
//! ```

pub mod archive;
pub mod config;
pub mod error;
pub mod patch;
pub mod pipeline;

// Re-export commonly used types
pub use archive::{
    output_path_for, ArchiveReader, ArchiveWriter, EntryInfo, EntryMethod, JarMatcher,
};
pub use config::PatchConfig;
pub use error::{ErrorKind, PatchError, Result, Stage};
pub use patch::{patch_descriptor, PatchOutcome};
pub use pipeline::{patch_archive, PatchReport};
