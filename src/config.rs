//! Merge options.
//!
//! Every field has a default, so an empty TOML document (or
//! `Options::default()`) gives the standard behavior: base folder `values`,
//! public declarations of type `string`, and legacy `choice` arguments accepted
//! with a deprecation marker.

use crate::ResourceFolder;
use serde::Deserialize;
use thiserror::Error;

/// How legacy `choice` arguments are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoicePolicy {
    /// Resolve normally, mark the resource deprecated.
    #[default]
    Deprecate,
    /// Resolve normally, no marker.
    Allow,
    /// Fail every argument that uses `choice`.
    Reject,
}

/// Options shared by every resource in a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Folder whose variant decides which arguments exist.
    pub base_folder: String,
    /// Type a public declaration must carry to publish a resource.
    pub resource_type: String,
    pub choice_policy: ChoicePolicy,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            base_folder: "values".to_string(),
            resource_type: "string".to_string(),
            choice_policy: ChoicePolicy::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid options: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("base_folder must not be empty")]
    EmptyBaseFolder,
}

impl Options {
    /// Parse options from a TOML document.
    ///
    /// ```
    /// use phrasetype::{ChoicePolicy, Options};
    ///
    /// let options = Options::from_toml_str("choice_policy = \"reject\"").unwrap();
    /// assert_eq!(options.choice_policy, ChoicePolicy::Reject);
    /// assert_eq!(options.base_folder, "values");
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let options: Options = toml::from_str(source)?;
        if options.base_folder.trim().is_empty() {
            return Err(ConfigError::EmptyBaseFolder);
        }
        Ok(options)
    }

    pub fn base_folder(&self) -> ResourceFolder {
        ResourceFolder::new(self.base_folder.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_document_gives_defaults() {
        assert_eq!(Options::from_toml_str("").unwrap(), Options::default());
    }

    #[rstest]
    fn overrides_are_read() {
        let source = "base_folder = \"values-en\"\nresource_type = \"plurals\"\nchoice_policy = \"allow\"\n";
        let options = Options::from_toml_str(source).unwrap();

        assert_eq!(options.base_folder(), ResourceFolder::from("values-en"));
        assert_eq!(options.resource_type, "plurals");
        assert_eq!(options.choice_policy, ChoicePolicy::Allow);
    }

    #[rstest]
    #[case("colour = true")]
    #[case("choice_policy = \"forbid\"")]
    #[case("base_folder = 3")]
    fn malformed_documents_are_rejected(#[case] source: &str) {
        assert!(matches!(Options::from_toml_str(source), Err(ConfigError::Parse(_))), "{source}");
    }

    #[rstest]
    fn blank_base_folder_is_rejected() {
        assert!(matches!(Options::from_toml_str("base_folder = \"  \""), Err(ConfigError::EmptyBaseFolder)));
    }
}
