//! Argument-type inference for ICU MessageFormat strings.
//!
//! Given every locale variant of a message such as
//! `{count, plural, one {# item} other {# items}}`, this crate extracts each
//! placeholder, classifies the formatting capability it needs, and resolves one
//! locale-independent type per argument that satisfies every variant and every
//! repeated occurrence.
//!
//! ```text
//! text ── tokenizer ──▶ Vec<Token> ──┐
//!         (capability per token)     │  one TokenizedVariant per folder
//!                                    v
//!                        merge (lattice per argument)
//!                                    │
//!                                    v
//!                             MergedResource
//! ```
//!
//! The core is pure and synchronous: no I/O and no shared state, so distinct
//! resources may be processed concurrently by the caller (or by the
//! `parallel` feature of [`process`]).

#[macro_use]
mod macros;
mod api;
mod capability;
mod config;
mod lattice;
mod merge;
mod model;
mod pipeline;
mod tokenizer;

use std::fmt;

pub use api::{process, process_verbose, tokenize, tokenize_resource};
pub use capability::{ArgKind, Capability, classify, classify_date_pattern};
pub use config::{ChoicePolicy, ConfigError, Options};
pub use lattice::{ArgumentType, most_specific, resolve_argument_type, resolve_capability};
pub use merge::merge_resource;
pub use model::{
    DeclarationError, Deprecation, FailureReason, MergeWarning, MergedResource, MessageResource, ParseIssue,
    PublicResource, ResolutionFailure, ResolvedArgument, ResourceFolder, ResourceName, TokenizedVariant, Visibility,
};
pub use pipeline::{ProcessOutput, RunMetrics};
pub use tokenizer::PatternError;

// --- Core token types -------------------------------------------------------

/// Identity of a placeholder: either a name or a zero-based position.
///
/// The same identity denotes the same logical argument in every variant and in
/// every nested branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArgId {
    Name(String),
    Position(u32),
}

impl ArgId {
    /// Key into the runtime argument map: the name, or the position in decimal.
    pub fn key(&self) -> String {
        match self {
            ArgId::Name(name) => name.clone(),
            ArgId::Position(position) => position.to_string(),
        }
    }

    /// Parameter name used by generated accessors (`arg0`, `arg1`, ... for positions).
    pub fn parameter_name(&self) -> String {
        match self {
            ArgId::Name(name) => name.clone(),
            ArgId::Position(position) => format!("arg{position}"),
        }
    }

    /// True for positional identities.
    pub fn is_position(&self) -> bool {
        matches!(self, ArgId::Position(_))
    }
}

impl fmt::Display for ArgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgId::Name(name) => f.write_str(name),
            ArgId::Position(position) => write!(f, "{position}"),
        }
    }
}

/// One placeholder occurrence inside a message pattern.
///
/// Repeated occurrences (for example the same argument inside several plural
/// branches) each produce their own token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: ArgId,
    pub capability: Capability,
}

impl Token {
    pub fn named(name: impl Into<String>, capability: Capability) -> Self {
        Token { id: ArgId::Name(name.into()), capability }
    }

    pub fn positional(position: u32, capability: Capability) -> Self {
        Token { id: ArgId::Position(position), capability }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_identity_maps_to_arg_prefixed_parameter() {
        let id = ArgId::Position(3);
        assert_eq!(id.key(), "3");
        assert_eq!(id.parameter_name(), "arg3");
        assert_eq!(id.to_string(), "3");
    }

    #[test]
    fn named_identity_is_its_own_parameter() {
        let id = ArgId::Name("count".to_string());
        assert_eq!(id.key(), "count");
        assert_eq!(id.parameter_name(), "count");
        assert!(!id.is_position());
    }
}
