//! TOML manifest read by the CLI.
//!
//! ```toml
//! [[public]]
//! name = "greeting"
//! type = "string"
//!
//! [[folders.values]]
//! name = "greeting"
//! description = "Shown on launch"
//! text = "Hello {name}!"
//!
//! [[folders.values-es]]
//! name = "greeting"
//! text = "¡Hola {name}!"
//! ```

use phrasetype::{DeclarationError, MessageResource, PublicResource, ResourceFolder, ResourceName};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid manifest: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("public declaration #{index}: {source}")]
    Declaration { index: usize, source: DeclarationError },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    public: Vec<RawPublic>,
    #[serde(default)]
    folders: BTreeMap<String, Vec<RawMessage>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPublic {
    name: Option<String>,
    #[serde(rename = "type")]
    resource_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMessage {
    name: String,
    description: Option<String>,
    text: String,
}

#[derive(Debug)]
pub struct Manifest {
    pub public: Vec<PublicResource>,
    pub inputs: BTreeMap<ResourceFolder, Vec<MessageResource>>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let source =
            std::fs::read_to_string(path).map_err(|source| ManifestError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&source)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest = toml::from_str(source)?;

        let public = raw
            .public
            .iter()
            .enumerate()
            .map(|(index, p)| {
                PublicResource::from_attributes(p.name.as_deref(), p.resource_type.as_deref())
                    .map_err(|source| ManifestError::Declaration { index: index + 1, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let inputs = raw
            .folders
            .into_iter()
            .map(|(folder, messages)| {
                let resources = messages
                    .into_iter()
                    .map(|m| MessageResource { name: ResourceName::new(m.name), description: m.description, text: m.text })
                    .collect();
                (ResourceFolder::new(folder), resources)
            })
            .collect();

        Ok(Manifest { public, inputs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_folders_and_declarations() {
        let source = r#"
[[public]]
name = "greeting"
type = "string"

[[folders.values]]
name = "greeting"
description = "Shown on launch"
text = "Hello {name}!"

[[folders.values-es]]
name = "greeting"
text = "Hola {name}"
"#;
        let manifest = Manifest::from_toml_str(source).unwrap();

        assert_eq!(
            manifest.public,
            vec![PublicResource::Named { name: "greeting".to_string(), resource_type: "string".to_string() }]
        );
        let base = &manifest.inputs[&ResourceFolder::from("values")];
        assert_eq!(base[0].description.as_deref(), Some("Shown on launch"));
        assert_eq!(manifest.inputs[&ResourceFolder::from("values-es")][0].text, "Hola {name}");
    }

    #[test]
    fn empty_manifest_is_valid() {
        let manifest = Manifest::from_toml_str("").unwrap();
        assert!(manifest.public.is_empty());
        assert!(manifest.inputs.is_empty());
    }

    #[test]
    fn half_declaration_is_rejected() {
        let err = Manifest::from_toml_str("[[public]]\ntype = \"string\"\n").unwrap_err();
        assert_eq!(err.to_string(), "public declaration #1: public declaration of type 'string' has no name");
    }

    #[test]
    fn empty_declaration_is_kept() {
        let manifest = Manifest::from_toml_str("[[public]]\n").unwrap();
        assert_eq!(manifest.public, vec![PublicResource::EmptyDeclaration]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Manifest::from_toml_str("[[folders.values]]\nname = \"a\"\ntext = \"b\"\nlocale = \"en\"\n"),
            Err(ManifestError::Parse(_))
        ));
    }
}
