//! Tokenizer errors.
//!
//! Every variant carries an excerpt of the pattern (see `Cursor::excerpt`) so
//! the message can be shown verbatim next to the offending resource.

use thiserror::Error;

/// A syntactically invalid message pattern.
///
/// This is a normal, reportable outcome: the failing variant contributes no
/// tokens and its sibling variants are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("Bad argument syntax: {context}")]
    BadArgumentSyntax { context: String },

    #[error("Unmatched '{{' braces in message {context}")]
    UnmatchedBraces { context: String },

    #[error("Unsupported argument type: {context}")]
    UnsupportedArgumentType { context: String },

    #[error("No style field for complex argument: {context}")]
    MissingComplexStyle { context: String },

    #[error("Quoted literal argument style text reaches to the end of the message: {context}")]
    UnterminatedStyleQuote { context: String },

    #[error("Missing 'other' keyword in {kind} pattern in {context}")]
    MissingOther { kind: &'static str, context: String },

    #[error("Bad {kind} pattern syntax: {context}")]
    BadSelectorSyntax { kind: &'static str, context: String },

    #[error("No message fragment after {kind} selector: {context}")]
    MissingBranchMessage { kind: &'static str, context: String },

    #[error("Plural argument 'offset:' must precede key-message pairs: {context}")]
    MisplacedOffset { context: String },

    #[error("Missing value for plural 'offset:' {context}")]
    MissingOffsetValue { context: String },

    #[error("Bad syntax for numeric value: {context}")]
    BadNumber { context: String },

    #[error("Missing choice argument pattern in {context}")]
    MissingChoicePattern { context: String },

    #[error("Bad choice pattern syntax: {context}")]
    BadChoiceSyntax { context: String },

    #[error("Expected choice separator (#<\u{2264}) instead of '{found}' in choice pattern {context}")]
    BadChoiceSeparator { found: char, context: String },
}
