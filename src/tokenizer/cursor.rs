//! Character cursor over a message pattern.
//!
//! Positions are char indices, which is also what error messages report.

/// Longest excerpt quoted in an error message before it is cut with ` ...`.
const MAX_EXCERPT_LENGTH: usize = 24;

#[derive(Debug)]
pub(crate) struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    pub fn new(pattern: &str) -> Self {
        Cursor { chars: pattern.chars().collect(), pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.chars.len());
    }

    /// Consume `expected` if it is the next char.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_pattern_whitespace) {
            self.pos += 1;
        }
    }

    /// Consume chars while `pred` holds and return them.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.slice(start, self.pos)
    }

    /// Consume an identifier: every char that is neither pattern syntax nor
    /// pattern whitespace.
    pub fn take_identifier(&mut self) -> String {
        self.take_while(|c| !is_pattern_syntax(c) && !is_pattern_whitespace(c))
    }

    /// Consume the chars that may make up a numeric literal (`0-9 + - . e E ∞`).
    ///
    /// Whether they actually form a number is checked by the caller.
    pub fn take_numeric_run(&mut self) -> String {
        self.take_while(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E' | '\u{221E}'))
    }

    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// Quote the pattern from `start` for an error message.
    ///
    /// ```text
    /// start == 0  ->  "whole pattern"
    /// start > 0   ->  [at pattern index 6] "{test}}"
    /// long tail   ->  [at pattern index 2] "first twenty chars ..."
    /// ```
    ///
    /// The reported index counts UTF-16 code units, as ICU does, so an astral
    /// character before `start` counts twice.
    pub fn excerpt(&self, start: usize) -> String {
        let start = start.min(self.chars.len());
        let mut out = if start == 0 {
            String::from("\"")
        } else {
            let index: usize = self.chars[..start].iter().map(|c| c.len_utf16()).sum();
            format!("[at pattern index {index}] \"")
        };
        let tail = &self.chars[start..];
        if tail.len() <= MAX_EXCERPT_LENGTH {
            out.extend(tail.iter());
        } else {
            out.extend(tail[..MAX_EXCERPT_LENGTH - 4].iter());
            out.push_str(" ...");
        }
        out.push('"');
        out
    }

    /// Excerpt of the whole pattern.
    pub fn excerpt_all(&self) -> String {
        self.excerpt(0)
    }
}

/// Unicode `Pattern_White_Space`.
pub(crate) fn is_pattern_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' ' | '\u{85}' | '\u{200E}' | '\u{200F}' | '\u{2028}' | '\u{2029}'
    )
}

/// Unicode `Pattern_Syntax`.
pub(crate) fn is_pattern_syntax(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_punctuation() && c != '_';
    }
    matches!(
        c,
        '\u{A1}'..='\u{A7}'
            | '\u{A9}'
            | '\u{AB}'
            | '\u{AC}'
            | '\u{AE}'
            | '\u{B0}'
            | '\u{B1}'
            | '\u{B6}'
            | '\u{BB}'
            | '\u{BF}'
            | '\u{D7}'
            | '\u{F7}'
            | '\u{2010}'..='\u{2027}'
            | '\u{2030}'..='\u{203E}'
            | '\u{2041}'..='\u{2053}'
            | '\u{2055}'..='\u{205E}'
            | '\u{2190}'..='\u{245F}'
            | '\u{2500}'..='\u{2775}'
            | '\u{2794}'..='\u{2BFF}'
            | '\u{2E00}'..='\u{2E7F}'
            | '\u{3001}'..='\u{3003}'
            | '\u{3008}'..='\u{3020}'
            | '\u{3030}'
            | '\u{FD3E}'
            | '\u{FD3F}'
            | '\u{FE45}'
            | '\u{FE46}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_quotes_short_tail() {
        let cursor = Cursor::new("Test {{test}}");
        assert_eq!(cursor.excerpt(6), "[at pattern index 6] \"{test}}\"");
        assert_eq!(cursor.excerpt_all(), "\"Test {{test}}\"");
    }

    #[test]
    fn excerpt_index_counts_utf16_units() {
        let cursor = Cursor::new("😀 {{x}}");
        assert_eq!(cursor.excerpt(3), "[at pattern index 4] \"{x}}\"");

        let cursor = Cursor::new("é {{x}}");
        assert_eq!(cursor.excerpt(3), "[at pattern index 3] \"{x}}\"");
    }

    #[test]
    fn excerpt_truncates_long_tail() {
        let cursor = Cursor::new("abcdefghijklmnopqrstuvwxyz0123");
        assert_eq!(cursor.excerpt(0), "\"abcdefghijklmnopqrst ...\"");
    }

    #[test]
    fn identifiers_stop_at_syntax_and_whitespace() {
        let mut cursor = Cursor::new("user_name, number}");
        assert_eq!(cursor.take_identifier(), "user_name");
        assert_eq!(cursor.peek(), Some(','));

        let mut cursor = Cursor::new("naïve}");
        assert_eq!(cursor.take_identifier(), "naïve");
    }

    #[test]
    fn underscore_is_not_syntax() {
        assert!(!is_pattern_syntax('_'));
        assert!(is_pattern_syntax('{'));
        assert!(is_pattern_syntax('\u{2264}'));
        assert!(!is_pattern_syntax('é'));
    }
}
