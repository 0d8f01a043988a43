//! Iterative MessageFormat scanner.
//!
//! The grammar is recursive (branch bodies are messages that may contain
//! complex arguments with further branch bodies), but the scanner keeps its own
//! frame stack so that nesting depth never translates into native stack depth.
//!
//! ```text
//! stack (top at the right)
//!
//! "{n, plural, one {{who} ...} other {...}}"
//!
//! [Message(TopLevel)]                          '{' -> argument header
//! [Message(TopLevel), Branches(plural)]        selector "one", '{'
//! [.., Branches(plural), Message(Plural)]      '{' -> {who}, '}' pops
//! [Message(TopLevel), Branches(plural)]        selector "other", ...
//! ```
//!
//! A `Message` frame that reaches an argument start leaves itself on the stack,
//! reads the argument header, and pushes a `Branches`/`Choice` frame when the
//! argument is complex. A frame is popped once its terminator is consumed.

use super::cursor::Cursor;
use super::error::PatternError;
use crate::capability::{ArgKind, classify};
use crate::{ArgId, Token};

/// ICU caps argument numbers at `i32::MAX`.
const MAX_ARG_NUMBER: u32 = i32::MAX as u32;

/// What encloses a message body; decides its terminators and quoting rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    TopLevel,
    /// Branch of `plural`/`selectordinal`: `'#` starts quoted text.
    Plural,
    Select,
    /// Branch of `choice`: ends at `|` or `}`, and `'|` starts quoted text.
    Choice,
}

#[derive(Debug, Clone, Copy)]
struct Branches {
    kind: ArgKind,
    seen_selector: bool,
    has_other: bool,
}

#[derive(Debug, Clone, Copy)]
struct ChoiceState {
    style_start: usize,
    started: bool,
}

#[derive(Debug)]
enum Frame {
    Message(Context),
    Branches(Branches),
    Choice(ChoiceState),
}

enum MessageEnd {
    Finished,
    Argument,
}

/// Scan `pattern` and return its placeholder tokens in textual order.
pub(crate) fn scan(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let mut cursor = Cursor::new(pattern);
    let mut tokens = Vec::new();
    let mut stack = vec![Frame::Message(Context::TopLevel)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Message(context) => {
                if let MessageEnd::Argument = scan_message_text(&mut cursor, context)? {
                    stack.push(Frame::Message(context));
                    if let Some(style) = scan_argument(&mut cursor, &mut tokens)? {
                        stack.push(style);
                    }
                }
            }
            Frame::Branches(state) => {
                if let Some((state, context)) = next_branch(&mut cursor, state)? {
                    stack.push(Frame::Branches(state));
                    stack.push(Frame::Message(context));
                }
            }
            Frame::Choice(state) => {
                if let Some(state) = next_choice_branch(&mut cursor, state)? {
                    stack.push(Frame::Choice(state));
                    stack.push(Frame::Message(Context::Choice));
                }
            }
        }
    }

    Ok(tokens)
}

// --- Message text -----------------------------------------------------------

/// Skip literal text until an argument starts or the message ends.
///
/// On `Argument` the opening brace has been consumed. Choice branches leave
/// their terminator (`|` or `}`) for the enclosing `Choice` frame.
fn scan_message_text(cursor: &mut Cursor, context: Context) -> Result<MessageEnd, PatternError> {
    loop {
        let Some(c) = cursor.peek() else {
            return match context {
                Context::TopLevel => Ok(MessageEnd::Finished),
                _ => Err(unmatched(cursor)),
            };
        };
        match c {
            '\'' => skip_apostrophe(cursor, context),
            '{' => {
                cursor.bump();
                return Ok(MessageEnd::Argument);
            }
            '}' | '|' if context == Context::Choice => return Ok(MessageEnd::Finished),
            '}' if context != Context::TopLevel => {
                cursor.bump();
                return Ok(MessageEnd::Finished);
            }
            _ => {
                cursor.bump();
            }
        }
    }
}

/// Apostrophe handling in message text.
///
/// ```text
/// ''        literal apostrophe
/// '{...}'   quoted literal up to the next lone apostrophe (or end of input)
/// I'm       lone apostrophe, literal
/// ```
fn skip_apostrophe(cursor: &mut Cursor, context: Context) {
    cursor.bump();
    match cursor.peek() {
        Some('\'') => cursor.advance(1),
        Some(c) if starts_quote(c, context) => loop {
            match cursor.bump() {
                None => break,
                Some('\'') if cursor.peek() == Some('\'') => cursor.advance(1),
                Some('\'') => break,
                Some(_) => {}
            }
        },
        _ => {}
    }
}

fn starts_quote(c: char, context: Context) -> bool {
    match c {
        '{' | '}' => true,
        '|' => context == Context::Choice,
        '#' => context == Context::Plural,
        _ => false,
    }
}

// --- Argument header ----------------------------------------------------------

/// Read `name [, kind [, style]]` after an opening brace.
///
/// Pushes the argument's token and returns the frame that scans its branches
/// when the argument is complex.
fn scan_argument(cursor: &mut Cursor, tokens: &mut Vec<Token>) -> Result<Option<Frame>, PatternError> {
    cursor.skip_whitespace();
    if cursor.at_end() {
        return Err(unmatched(cursor));
    }

    let name_start = cursor.pos();
    let name = cursor.take_identifier();
    let id = parse_arg_id(&name).ok_or_else(|| bad_argument(cursor, name_start))?;

    cursor.skip_whitespace();
    match cursor.bump() {
        None => return Err(unmatched(cursor)),
        Some('}') => {
            tokens.push(Token { id, capability: classify(None, None) });
            return Ok(None);
        }
        Some(',') => {}
        Some(_) => return Err(bad_argument(cursor, name_start)),
    }

    cursor.skip_whitespace();
    let type_start = cursor.pos();
    let keyword = cursor.take_while(|c| c.is_ascii_alphabetic());
    cursor.skip_whitespace();
    let Some(next) = cursor.peek() else {
        return Err(unmatched(cursor));
    };
    if keyword.is_empty() || (next != ',' && next != '}') {
        return Err(bad_argument(cursor, name_start));
    }
    let kind = ArgKind::from_keyword(&keyword)
        .ok_or_else(|| PatternError::UnsupportedArgumentType { context: cursor.excerpt(type_start) })?;
    cursor.bump();

    if next == '}' {
        if kind.is_complex() {
            return Err(PatternError::MissingComplexStyle { context: cursor.excerpt(name_start) });
        }
        tokens.push(Token { id, capability: classify(Some(kind), None) });
        return Ok(None);
    }

    if kind.is_complex() {
        tokens.push(Token { id, capability: classify(Some(kind), None) });
        let frame = match kind {
            ArgKind::Choice => Frame::Choice(ChoiceState { style_start: cursor.pos(), started: false }),
            _ => Frame::Branches(Branches { kind, seen_selector: false, has_other: false }),
        };
        return Ok(Some(frame));
    }

    let style = scan_simple_style(cursor)?;
    tokens.push(Token { id, capability: classify(Some(kind), Some(&style)) });
    Ok(None)
}

/// All-digit identifiers are positions (`0` or no leading zero); anything else
/// is a name.
fn parse_arg_id(name: &str) -> Option<ArgId> {
    if name.is_empty() {
        return None;
    }
    if !name.bytes().all(|b| b.is_ascii_digit()) {
        return Some(ArgId::Name(name.to_string()));
    }
    if !regex!(r"^(?:0|[1-9][0-9]*)$").is_match(name) {
        return None;
    }
    name.parse::<u32>().ok().filter(|n| *n <= MAX_ARG_NUMBER).map(ArgId::Position)
}

/// Style text of a simple argument, up to its closing brace.
///
/// Nested braces are balanced and quoted runs are skipped; the text itself is
/// returned raw.
fn scan_simple_style(cursor: &mut Cursor) -> Result<String, PatternError> {
    let start = cursor.pos();
    let mut depth = 0usize;
    loop {
        match cursor.bump() {
            None => return Err(unmatched(cursor)),
            Some('\'') => loop {
                match cursor.bump() {
                    None => return Err(PatternError::UnterminatedStyleQuote { context: cursor.excerpt(start) }),
                    Some('\'') => break,
                    Some(_) => {}
                }
            },
            Some('{') => depth += 1,
            Some('}') if depth > 0 => depth -= 1,
            Some('}') => return Ok(cursor.slice(start, cursor.pos() - 1)),
            Some(_) => {}
        }
    }
}

// --- Complex styles -----------------------------------------------------------

/// Advance to the next `selector {message}` pair of a plural/select argument.
///
/// Returns `None` once the argument's closing brace is consumed.
fn next_branch(cursor: &mut Cursor, mut state: Branches) -> Result<Option<(Branches, Context)>, PatternError> {
    let kind = state.kind.keyword();
    loop {
        cursor.skip_whitespace();
        let Some(c) = cursor.peek() else {
            return Err(unmatched(cursor));
        };
        if c == '}' {
            cursor.bump();
            if !state.has_other {
                return Err(PatternError::MissingOther { kind, context: cursor.excerpt_all() });
            }
            return Ok(None);
        }

        let selector_start = cursor.pos();
        if c == '=' && state.kind.has_plural_style() {
            cursor.bump();
            let value = cursor.take_numeric_run();
            if value.is_empty() {
                return Err(PatternError::BadSelectorSyntax { kind, context: cursor.excerpt(selector_start) });
            }
            if !is_number(&value, false) {
                return Err(PatternError::BadNumber { context: cursor.excerpt(selector_start + 1) });
            }
        } else {
            let keyword = cursor.take_identifier();
            if keyword.is_empty() {
                return Err(PatternError::BadSelectorSyntax { kind, context: cursor.excerpt(selector_start) });
            }
            if state.kind.has_plural_style() && keyword == "offset" && cursor.peek() == Some(':') {
                if state.seen_selector {
                    return Err(PatternError::MisplacedOffset { context: cursor.excerpt(selector_start) });
                }
                cursor.bump();
                cursor.skip_whitespace();
                let value_start = cursor.pos();
                let value = cursor.take_numeric_run();
                if value.is_empty() {
                    return Err(PatternError::MissingOffsetValue { context: cursor.excerpt(selector_start) });
                }
                if !is_number(&value, false) {
                    return Err(PatternError::BadNumber { context: cursor.excerpt(value_start) });
                }
                state.seen_selector = true;
                continue;
            }
            if keyword == "other" {
                state.has_other = true;
            }
        }

        state.seen_selector = true;
        cursor.skip_whitespace();
        if !cursor.eat('{') {
            return Err(PatternError::MissingBranchMessage { kind, context: cursor.excerpt(selector_start) });
        }
        let context = if state.kind.has_plural_style() { Context::Plural } else { Context::Select };
        return Ok(Some((state, context)));
    }
}

/// Advance to the next `limit separator message` entry of a choice argument.
///
/// ```text
/// {0, choice, 0#none|1#one|1<many}
///             ^ start  ^ after '|'  ... '}' ends the argument
/// ```
fn next_choice_branch(cursor: &mut Cursor, state: ChoiceState) -> Result<Option<ChoiceState>, PatternError> {
    if state.started {
        match cursor.bump() {
            Some('}') => return Ok(None),
            Some('|') => cursor.skip_whitespace(),
            _ => return Err(unmatched(cursor)),
        }
    } else {
        cursor.skip_whitespace();
        if matches!(cursor.peek(), None | Some('}')) {
            return Err(PatternError::MissingChoicePattern { context: cursor.excerpt_all() });
        }
    }

    let number_start = cursor.pos();
    let limit = cursor.take_numeric_run();
    if limit.is_empty() {
        return Err(PatternError::BadChoiceSyntax { context: cursor.excerpt(state.style_start) });
    }
    if !is_number(&limit, true) {
        return Err(PatternError::BadNumber { context: cursor.excerpt(number_start) });
    }

    cursor.skip_whitespace();
    match cursor.bump() {
        None => Err(PatternError::BadChoiceSyntax { context: cursor.excerpt(state.style_start) }),
        Some('#' | '<' | '\u{2264}') => Ok(Some(ChoiceState { started: true, ..state })),
        Some(found) => Err(PatternError::BadChoiceSeparator { found, context: cursor.excerpt(state.style_start) }),
    }
}

/// Decimal literal as accepted for `=N`, `offset:N` and choice limits.
fn is_number(text: &str, allow_infinity: bool) -> bool {
    if allow_infinity && regex!(r"^[+-]?\x{221E}$").is_match(text) {
        return true;
    }
    regex!(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").is_match(text)
}

fn unmatched(cursor: &Cursor) -> PatternError {
    PatternError::UnmatchedBraces { context: cursor.excerpt_all() }
}

fn bad_argument(cursor: &Cursor, name_start: usize) -> PatternError {
    PatternError::BadArgumentSyntax { context: cursor.excerpt(name_start) }
}
