//! Plugin descriptor patching
//!
//! The descriptor is treated as plain text: the first occurrence of the closing
//! tag is replaced by the patch block followed by the same closing tag. No XML
//! parsing takes place, so malformed descriptors pass through with exactly the
//! same bytes outside the insertion point.

use crate::config::PatchConfig;

/// Result of patching one descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Block inserted; byte offset where it starts
    Patched { text: String, offset: usize },
    /// Closing tag absent; text returned as given
    Unchanged { text: String },
}

impl PatchOutcome {
    /// Final descriptor text
    pub fn text(&self) -> &str {
        match self {
            PatchOutcome::Patched { text, .. } | PatchOutcome::Unchanged { text } => text,
        }
    }

    /// Final descriptor text, consuming the outcome
    pub fn into_text(self) -> String {
        match self {
            PatchOutcome::Patched { text, .. } | PatchOutcome::Unchanged { text } => text,
        }
    }

    pub fn is_patched(&self) -> bool {
        matches!(self, PatchOutcome::Patched { .. })
    }
}

/// Insert `config.patch_block` before the first `config.closing_tag`.
///
/// Later occurrences of the tag are left alone.
pub fn patch_descriptor(text: &str, config: &PatchConfig) -> PatchOutcome {
    let Some(offset) = text.find(config.closing_tag.as_str()) else {
        return PatchOutcome::Unchanged {
            text: text.to_string(),
        };
    };

    let mut patched = String::with_capacity(text.len() + config.patch_block.len());
    patched.push_str(&text[..offset]);
    patched.push_str(&config.patch_block);
    patched.push_str(&text[offset..]);

    PatchOutcome::Patched {
        text: patched,
        offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PATCH_BLOCK;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inserts_block_before_closing_tag() {
        let config = PatchConfig::default();
        let outcome = patch_descriptor("<idea-plugin><name>X</name></idea-plugin>", &config);

        assert!(outcome.is_patched());
        assert_eq!(
            outcome.text(),
            format!(
                "<idea-plugin><name>X</name>{}</idea-plugin>",
                DEFAULT_PATCH_BLOCK
            )
        );
    }

    #[test]
    fn test_offset_points_at_block() {
        let config = PatchConfig::default();
        let input = "<idea-plugin>\n</idea-plugin>\n";
        match patch_descriptor(input, &config) {
            PatchOutcome::Patched { text, offset } => {
                assert_eq!(offset, "<idea-plugin>\n".len());
                assert!(text[offset..].starts_with(DEFAULT_PATCH_BLOCK));
                assert!(text.ends_with("</idea-plugin>\n"));
            }
            other => panic!("expected patch, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_tag_is_noop() {
        let config = PatchConfig::default();
        let input = "<idea-plugin><name>X</name>";
        let outcome = patch_descriptor(input, &config);

        assert_eq!(
            outcome,
            PatchOutcome::Unchanged {
                text: input.to_string()
            }
        );
    }

    #[test]
    fn test_only_first_occurrence_replaced() {
        let config = PatchConfig::default();
        let input = "<idea-plugin></idea-plugin></idea-plugin>";
        let outcome = patch_descriptor(input, &config);

        assert_eq!(outcome.text().matches(DEFAULT_PATCH_BLOCK).count(), 1);
        assert_eq!(outcome.text().matches("</idea-plugin>").count(), 2);
        assert!(outcome
            .text()
            .starts_with(&format!("<idea-plugin>{}</idea-plugin>", DEFAULT_PATCH_BLOCK)));
    }

    #[test]
    fn test_custom_block_and_tag() {
        let config = PatchConfig {
            closing_tag: "</root>".to_string(),
            patch_block: "<added/>".to_string(),
            ..PatchConfig::default()
        };
        let outcome = patch_descriptor("<root><a/></root></idea-plugin>", &config);
        assert_eq!(outcome.into_text(), "<root><a/><added/></root></idea-plugin>");
    }

    #[test]
    fn test_non_ascii_prefix_kept() {
        let config = PatchConfig::default();
        let input = "<idea-plugin><description>定位代码</description></idea-plugin>";
        let outcome = patch_descriptor(input, &config);
        assert!(outcome
            .text()
            .starts_with("<idea-plugin><description>定位代码</description>  <extensions"));
    }
}
