//! Resource-level data model.
//!
//! These types sit on either side of the core: `MessageResource` and
//! `PublicResource` come in from the file-parsing collaborator,
//! `MergedResource` goes out to whatever emits accessors.
//!
//! ```text
//! (folder, MessageResource) ── tokenize ──▶ TokenizedVariant
//!                                               │  one per folder
//!                                               v
//!                         merge + [PublicResource] ──▶ MergedResource
//! ```

use crate::tokenizer::PatternError;
use crate::{ArgumentType, Capability, Token};
use std::fmt;
use thiserror::Error;

// --- Names --------------------------------------------------------------------

/// Logical message name, shared by every folder that declares the message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceName(String);

impl ResourceName {
    pub fn new(name: impl Into<String>) -> Self {
        ResourceName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceName {
    fn from(name: &str) -> Self {
        ResourceName::new(name)
    }
}

/// Folder qualifier such as `values` or `values-es-rMX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceFolder(String);

impl ResourceFolder {
    pub fn new(folder: impl Into<String>) -> Self {
        ResourceFolder(folder.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceFolder {
    fn from(folder: &str) -> Self {
        ResourceFolder::new(folder)
    }
}

// --- Inputs -------------------------------------------------------------------

/// One `(name, description, text)` triple read from a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageResource {
    pub name: ResourceName,
    pub description: Option<String>,
    pub text: String,
}

impl MessageResource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        MessageResource { name: ResourceName::new(name), description: None, text: text.into() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A visibility declaration.
///
/// An empty declaration is legal: it opts the library into explicit visibility
/// without making anything public.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicResource {
    Named { name: String, resource_type: String },
    EmptyDeclaration,
}

/// A visibility declaration that carries only half of its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("public declaration of type '{resource_type}' has no name")]
    MissingName { resource_type: String },
    #[error("public declaration '{name}' has no type")]
    MissingType { name: String },
}

impl PublicResource {
    /// Build a declaration from its optional `name` and `type` attributes.
    pub fn from_attributes(name: Option<&str>, resource_type: Option<&str>) -> Result<Self, DeclarationError> {
        match (name, resource_type) {
            (Some(name), Some(resource_type)) => {
                Ok(PublicResource::Named { name: name.to_string(), resource_type: resource_type.to_string() })
            }
            (None, None) => Ok(PublicResource::EmptyDeclaration),
            (None, Some(resource_type)) => {
                Err(DeclarationError::MissingName { resource_type: resource_type.to_string() })
            }
            (Some(name), None) => Err(DeclarationError::MissingType { name: name.to_string() }),
        }
    }

    fn publishes(&self, name: &ResourceName, resource_type: &str) -> bool {
        match self {
            PublicResource::Named { name: declared, resource_type: declared_type } => {
                declared == name.as_str() && declared_type == resource_type
            }
            PublicResource::EmptyDeclaration => false,
        }
    }
}

// --- Tokenized variants -------------------------------------------------------

/// One folder's text for one resource, after tokenization.
///
/// A failed parse keeps the error and no tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedVariant {
    pub name: ResourceName,
    pub description: Option<String>,
    pub tokens: Vec<Token>,
    pub error: Option<PatternError>,
}

impl TokenizedVariant {
    pub fn parsed(resource: &MessageResource, tokens: Vec<Token>) -> Self {
        TokenizedVariant {
            name: resource.name.clone(),
            description: resource.description.clone(),
            tokens,
            error: None,
        }
    }

    pub fn failed(resource: &MessageResource, error: PatternError) -> Self {
        TokenizedVariant {
            name: resource.name.clone(),
            description: resource.description.clone(),
            tokens: Vec::new(),
            error: Some(error),
        }
    }
}

// --- Merge output -------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Public when nothing is declared, or when a declaration of
    /// `resource_type` names this resource.
    pub fn of(name: &ResourceName, public: &[PublicResource], resource_type: &str) -> Visibility {
        if public.is_empty() || public.iter().any(|p| p.publishes(name, resource_type)) {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deprecation {
    None,
    WithMessage(String),
}

impl Deprecation {
    pub(crate) fn legacy_choice() -> Self {
        Deprecation::WithMessage(
            "Use of the old 'choice' argument type is discouraged. Use a 'plural' or 'select' argument instead."
                .to_string(),
        )
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(self, Deprecation::WithMessage(_))
    }
}

/// One argument that survived the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArgument {
    /// Runtime map key: the name, or the position in decimal.
    pub key: String,
    pub parameter_name: String,
    pub argument_type: ArgumentType,
    /// The capability the fold settled on.
    pub capability: Capability,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// No single capability satisfies every observed one (listed in first-seen order).
    Incompatible(Vec<Capability>),
    /// The key is used by name in one place and by position in another.
    MixedIdentity,
    /// A `choice` argument while the policy rejects it.
    ChoiceRejected,
}

/// An argument that was dropped from the resolved list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionFailure {
    pub key: String,
    pub reason: FailureReason,
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            FailureReason::Incompatible(_) => write!(f, "Incompatible argument types for: {}", self.key),
            FailureReason::MixedIdentity => {
                write!(f, "Argument {} is referenced both by name and by position", self.key)
            }
            FailureReason::ChoiceRejected => {
                write!(f, "Argument {} uses the 'choice' argument type, which is not allowed", self.key)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeWarning {
    /// The argument resolved to [`ArgumentType::Nothing`]: it renders no value.
    NoArgument { key: String },
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeWarning::NoArgument { key } => write!(f, "Argument {key} does not render any value"),
        }
    }
}

/// A variant whose text failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    pub folder: ResourceFolder,
    pub message: String,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.folder, self.message)
    }
}

/// Canonical, locale-independent description of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedResource {
    pub name: ResourceName,
    pub description: Option<String>,
    pub visibility: Visibility,
    /// Resolved arguments in first-seen order of the base variant.
    pub arguments: Vec<ResolvedArgument>,
    pub deprecation: Deprecation,
    pub failures: Vec<ResolutionFailure>,
    /// Base-variant arguments are exactly the positions `0..n`.
    pub has_contiguous_numbered_args: bool,
    pub parse_issues: Vec<ParseIssue>,
    pub warnings: Vec<MergeWarning>,
}

impl MergedResource {
    pub fn failed_keys(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.key.as_str()).collect()
    }

    /// No parse issue and no resolution failure.
    pub fn is_clean(&self) -> bool {
        self.parse_issues.is_empty() && self.failures.is_empty()
    }
}
