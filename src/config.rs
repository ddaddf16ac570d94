//! Patch configuration
//!
//! Every literal the pipeline depends on lives in [`PatchConfig`]. The defaults
//! target the CodeLocator IntelliJ plugin distribution; a TOML file can override
//! any subset of them:
//!
//! ```toml
//! jar_prefix = "CodeLocatorPlugin"
//! jar_suffix = ".jar"
//! require_closing_tag = true
//! ```

use crate::archive::JarMatcher;
use crate::error::{PatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Base-name prefix of the plugin jar inside the distribution zip
pub const DEFAULT_JAR_PREFIX: &str = "CodeLocatorPlugin";

/// Base-name suffix of the plugin jar
pub const DEFAULT_JAR_SUFFIX: &str = ".jar";

/// Base name of the plugin descriptor inside the jar
pub const DEFAULT_DESCRIPTOR_NAME: &str = "plugin.xml";

/// Closing tag the patch block is inserted in front of
pub const DEFAULT_CLOSING_TAG: &str = "</idea-plugin>";

/// Marker appended to the output file stem
pub const DEFAULT_OUTPUT_SUFFIX: &str = "k2";

/// Extension block declaring K1/K2 Kotlin plugin mode support
pub const DEFAULT_PATCH_BLOCK: &str = concat!(
    "  <extensions defaultExtensionNs=\"org.jetbrains.kotlin\">\n",
    "    <supportsKotlinPluginMode supportsK1=\"true\" supportsK2=\"true\" />\n",
    "  </extensions>\n",
);

/// Settings for one patch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchConfig {
    /// Jar base name must start with this
    pub jar_prefix: String,

    /// Jar base name must end with this
    pub jar_suffix: String,

    /// Exact base name of the descriptor entry inside the jar
    pub descriptor_name: String,

    /// Literal tag that receives the patch block
    pub closing_tag: String,

    /// Text inserted immediately before the closing tag
    pub patch_block: String,

    /// Inserted between the input stem and `.zip` in the output name
    pub output_suffix: String,

    /// Fail instead of passing the descriptor through when the closing tag is absent
    pub require_closing_tag: bool,

    /// Fail when more than one entry matches the jar pattern
    pub require_unique_jar: bool,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            jar_prefix: DEFAULT_JAR_PREFIX.to_string(),
            jar_suffix: DEFAULT_JAR_SUFFIX.to_string(),
            descriptor_name: DEFAULT_DESCRIPTOR_NAME.to_string(),
            closing_tag: DEFAULT_CLOSING_TAG.to_string(),
            patch_block: DEFAULT_PATCH_BLOCK.to_string(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            require_closing_tag: false,
            require_unique_jar: false,
        }
    }
}

impl PatchConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PatchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PatchError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject settings that would make every lookup or replacement meaningless
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("jar_prefix", &self.jar_prefix),
            ("jar_suffix", &self.jar_suffix),
            ("descriptor_name", &self.descriptor_name),
            ("closing_tag", &self.closing_tag),
            ("output_suffix", &self.output_suffix),
        ];
        for (key, value) in required {
            if value.is_empty() {
                return Err(PatchError::Config(format!("{} must not be empty", key)));
            }
        }

        if self.descriptor_name.contains('/') {
            return Err(PatchError::Config(
                "descriptor_name is a base name and must not contain '/'".to_string(),
            ));
        }

        Ok(())
    }

    /// Matcher selecting the plugin jar
    pub fn jar_matcher(&self) -> JarMatcher {
        JarMatcher::new(&self.jar_prefix, &self.jar_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = PatchConfig::default();
        config.validate().unwrap();
        assert_eq!(config.jar_matcher().pattern(), "CodeLocatorPlugin*.jar");
        assert!(!config.require_closing_tag);
        assert!(!config.require_unique_jar);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PatchConfig::from_toml_str(
            r#"
            jar_prefix = "OtherPlugin"
            require_unique_jar = true
            "#,
        )
        .unwrap();

        assert_eq!(config.jar_prefix, "OtherPlugin");
        assert_eq!(config.jar_suffix, ".jar");
        assert_eq!(config.patch_block, DEFAULT_PATCH_BLOCK);
        assert!(config.require_unique_jar);
    }

    #[test]
    fn test_empty_field_rejected() {
        let err = PatchConfig::from_toml_str("closing_tag = \"\"").unwrap_err();
        assert!(matches!(err, PatchError::Config(ref msg) if msg.contains("closing_tag")));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = PatchConfig::from_toml_str("jar_prefx = \"typo\"").unwrap_err();
        assert!(matches!(err, PatchError::Config(_)));
    }

    #[test]
    fn test_descriptor_name_must_be_base_name() {
        let err = PatchConfig::from_toml_str("descriptor_name = \"META-INF/plugin.xml\"")
            .unwrap_err();
        assert!(matches!(err, PatchError::Config(_)));
    }
}
