//! Message-pattern tokenizer.
//!
//! Turns one ICU MessageFormat pattern into the ordered list of placeholder
//! [`Token`](crate::Token)s it contains, including every occurrence nested in
//! plural, select, selectordinal and choice branches.
//!
//! ## How the parts work together
//!
//! ```text
//! &str ── Cursor (cursor.rs) ── char-indexed view, whitespace and identifier rules
//!              │
//!              v
//!        scan (scanner.rs)
//!          - explicit frame stack instead of native recursion
//!          - Message frames: literal text, apostrophe quoting, '{' starts an argument
//!          - Branches / Choice frames: selector lists of complex arguments
//!              │
//!              v
//!        Vec<Token> | PatternError (error.rs)
//! ```
//!
//! The grammar and the wording of error messages follow ICU's `MessagePattern`
//! in its default apostrophe mode (`DOUBLE_OPTIONAL`): a single apostrophe only
//! starts quoted text when it precedes a syntax character, and `''` is always a
//! literal apostrophe.
//!
//! Nesting depth is bounded only by the input length; the scanner never
//! recurses, so adversarial nesting costs heap, not stack.

#[path = "tokenizer/cursor.rs"]
mod cursor;
#[path = "tokenizer/error.rs"]
mod error;
#[path = "tokenizer/scanner.rs"]
mod scanner;


pub use error::PatternError;
pub(crate) use scanner::scan;
