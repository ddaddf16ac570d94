use crate::archive::reader::ArchiveReader;
use crate::archive::writer::ArchiveWriter;
use crate::config::PatchConfig;
use crate::error::{PatchError, Result};
use crate::patch::{patch_descriptor, PatchOutcome};
use tracing::{debug, warn};

/// Descriptor entry that went through the patcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedDescriptor {
    pub path: String,
    /// False when the closing tag was absent and the text passed through
    pub patched: bool,
}

/// New jar contents plus what happened to each entry
#[derive(Debug, Clone)]
pub struct RewrittenJar {
    pub data: Vec<u8>,
    pub descriptors: Vec<PatchedDescriptor>,
    /// Entries copied without modification
    pub copied: usize,
}

/// Rebuild the jar, patching every entry named `config.descriptor_name`.
///
/// All other entries are raw-copied in their original order. Fails when no
/// descriptor exists, so no output is produced for a jar we cannot patch.
pub fn rewrite_jar(jar: Vec<u8>, jar_path: &str, config: &PatchConfig) -> Result<RewrittenJar> {
    let mut reader = ArchiveReader::from_bytes(jar, jar_path)?;
    let mut writer = ArchiveWriter::in_memory(jar_path);
    let mut descriptors = Vec::new();
    let mut copied = 0;

    for index in 0..reader.entry_count() {
        let entry = reader.entry(index)?;

        if entry.is_dir || entry.base_name() != config.descriptor_name {
            writer.copy_raw_from(&mut reader, index)?;
            debug!(entry = %entry.path, method = %entry.method, "copied jar entry");
            copied += 1;
            continue;
        }

        let bytes = reader.read_entry(index)?;
        let text = String::from_utf8(bytes).map_err(|_| PatchError::InvalidDescriptor {
            path: format!("{}!/{}", jar_path, entry.path),
        })?;

        let outcome = patch_descriptor(&text, config);
        let patched = outcome.is_patched();
        if let PatchOutcome::Patched { offset, .. } = &outcome {
            debug!(descriptor = %entry.path, offset, "inserted patch block");
        } else {
            if config.require_closing_tag {
                return Err(PatchError::ClosingTagMissing {
                    tag: config.closing_tag.clone(),
                    path: entry.path,
                });
            }
            warn!(
                descriptor = %entry.path,
                "closing tag {} not found, descriptor left unchanged",
                config.closing_tag
            );
        }

        let text = outcome.into_text();
        writer.add_file(&entry.path, text.as_bytes(), entry.modified)?;
        debug!(descriptor = %entry.path, patched, "rewrote descriptor");
        descriptors.push(PatchedDescriptor {
            path: entry.path,
            patched,
        });
    }

    if descriptors.is_empty() {
        return Err(PatchError::DescriptorNotFound {
            name: config.descriptor_name.clone(),
            jar: jar_path.to_string(),
        });
    }

    Ok(RewrittenJar {
        data: writer.finish_into_bytes()?,
        descriptors,
        copied,
    })
}
