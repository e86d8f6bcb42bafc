//! Generator configuration.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```json
//! {
//!   "prefix": "app_",
//!   "uppercase": ["constant"],
//!   "context_args": true,
//!   "include_files": ["app_output.h"]
//! }
//! ```
//!
//! Command-line flags are applied on top of a loaded file by the CLI.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::definition::DefinitionKind;
use crate::error::{GctplError, Result};
use crate::generator::literal;

/// File extensions of the two generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extensions {
    /// Declaration file extension (default `h`).
    pub header: String,
    /// Implementation file extension (default `c`).
    pub source: String,
}

impl Default for Extensions {
    fn default() -> Self {
        Self {
            header: "h".into(),
            source: "c".into(),
        }
    }
}

/// Options consumed by [`crate::generator::Generator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Prepended to every generated identifier.
    pub prefix: String,
    pub extensions: Extensions,
    /// Definition kinds whose generated names are upper-cased; the rest are lower-cased.
    pub uppercase: BTreeSet<DefinitionKind>,
    /// Maximum length of a generated string literal line.
    pub max_line_length: usize,
    /// Pass arguments bundled in a context struct pointer.
    pub context_args: bool,
    /// Variadic function called by every generated render function.
    pub render_function: String,
    /// Extra files `#include`d by the implementation file.
    pub include_files: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            extensions: Extensions::default(),
            uppercase: BTreeSet::from([DefinitionKind::Function, DefinitionKind::Constant]),
            max_line_length: 80,
            context_args: false,
            render_function: "printf".into(),
            include_files: Vec::new(),
        }
    }
}

fn is_identifier_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl GeneratorConfig {
    /// Smallest line length that still fits one escaped character per literal line.
    pub const MIN_LINE_LENGTH: usize = literal::LITERAL_OVERHEAD + literal::LITERAL_INDENT.len() + 2;

    /// Load a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GctplError::ConfigNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| GctplError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| GctplError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Whether generated names of this kind are upper-cased.
    pub fn is_uppercase(&self, kind: DefinitionKind) -> bool {
        self.uppercase.contains(&kind)
    }

    /// Check value ranges before any code is generated.
    pub fn validate(&self) -> Result<()> {
        if self.max_line_length < Self::MIN_LINE_LENGTH {
            return Err(GctplError::InvalidConfig(format!(
                "max line length {} is too small (minimum {})",
                self.max_line_length,
                Self::MIN_LINE_LENGTH
            )));
        }

        if !self.prefix.chars().all(is_identifier_part) {
            return Err(GctplError::InvalidConfig(format!(
                "prefix '{}' may only contain letters, digits and '_'",
                self.prefix
            )));
        }

        let mut render = self.render_function.chars();
        let valid_render = render
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && render.all(is_identifier_part);
        if !valid_render {
            return Err(GctplError::InvalidConfig(format!(
                "render function '{}' is not a C identifier",
                self.render_function
            )));
        }

        if self.extensions.header.is_empty() || self.extensions.source.is_empty() {
            return Err(GctplError::InvalidConfig(
                "output file extensions must not be empty".into(),
            ));
        }
        if self.extensions.header == self.extensions.source {
            return Err(GctplError::InvalidConfig(format!(
                "header and source extensions are both '{}'",
                self.extensions.header
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.prefix, "");
        assert_eq!(config.extensions.header, "h");
        assert_eq!(config.extensions.source, "c");
        assert!(config.is_uppercase(DefinitionKind::Function));
        assert!(config.is_uppercase(DefinitionKind::Constant));
        assert_eq!(config.max_line_length, 80);
        assert!(!config.context_args);
        assert_eq!(config.render_function, "printf");
        assert!(config.include_files.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "prefix": "app_", "uppercase": ["constant"] }"#).unwrap();
        assert_eq!(config.prefix, "app_");
        assert!(config.is_uppercase(DefinitionKind::Constant));
        assert!(!config.is_uppercase(DefinitionKind::Function));
        assert_eq!(config.max_line_length, 80);
        assert_eq!(config.extensions, Extensions::default());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gctpl.json");
        let config = GeneratorConfig {
            prefix: "ui_".into(),
            context_args: true,
            render_function: "log_printf".into(),
            include_files: vec!["log.h".into()],
            ..GeneratorConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(GeneratorConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let result = GeneratorConfig::load(Path::new("/tmp/nonexistent_gctpl_config.json"));
        assert!(matches!(result, Err(GctplError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            GeneratorConfig::load(&path),
            Err(GctplError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let short = GeneratorConfig {
            max_line_length: 10,
            ..GeneratorConfig::default()
        };
        assert!(short.validate().is_err());

        let min = GeneratorConfig {
            max_line_length: GeneratorConfig::MIN_LINE_LENGTH,
            ..GeneratorConfig::default()
        };
        assert!(min.validate().is_ok());

        let prefix = GeneratorConfig {
            prefix: "my-app".into(),
            ..GeneratorConfig::default()
        };
        assert!(prefix.validate().is_err());

        let render = GeneratorConfig {
            render_function: "2print".into(),
            ..GeneratorConfig::default()
        };
        assert!(render.validate().is_err());

        let same_ext = GeneratorConfig {
            extensions: Extensions {
                header: "c".into(),
                source: "c".into(),
            },
            ..GeneratorConfig::default()
        };
        assert!(same_ext.validate().is_err());
    }
}
