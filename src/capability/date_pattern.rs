//! Custom date/time sub-pattern inspection.
//!
//! A `date` or `time` argument whose style is neither a canonical keyword nor
//! empty carries an ICU date pattern such as `EEE, MMM d 'at' h:mm a zzzz`.
//! What the argument must provide depends only on which field symbols the
//! pattern renders:
//!
//! ```text
//! family   symbols                          field bit
//! date     G y Y u U r Q q M L l w W d D F   DATE
//!          g E e c
//! time     a b B h H k K j J C m s S A       TIME
//! offset   Z O X x                           OFFSET
//! zone     z v V                             ZONE (implies OFFSET)
//! ```
//!
//! Text between apostrophes is literal and never scanned; `''` is an escaped
//! apostrophe and toggles quoting twice, which leaves the state unchanged.

use super::Capability;

bitflags::bitflags! {
    /// Date/time information a value must carry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) struct TemporalFields: u8 {
        const DATE   = 1 << 0;
        const TIME   = 1 << 1;
        const OFFSET = 1 << 2;
        const ZONE   = 1 << 3;
    }
}

/// Field family of one pattern letter, if it is a field symbol.
fn symbol_family(c: char) -> Option<TemporalFields> {
    match c {
        'G' | 'y' | 'Y' | 'u' | 'U' | 'r' | 'Q' | 'q' | 'M' | 'L' | 'l' | 'w' | 'W' | 'd' | 'D' | 'F' | 'g' | 'E'
        | 'e' | 'c' => Some(TemporalFields::DATE),
        'a' | 'b' | 'B' | 'h' | 'H' | 'k' | 'K' | 'j' | 'J' | 'C' | 'm' | 's' | 'S' | 'A' => Some(TemporalFields::TIME),
        'Z' | 'O' | 'X' | 'x' => Some(TemporalFields::OFFSET),
        'z' | 'v' | 'V' => Some(TemporalFields::ZONE | TemporalFields::OFFSET),
        _ => None,
    }
}

/// Collect the field families rendered by `pattern`, skipping quoted text.
pub(crate) fn scan_fields(pattern: &str) -> TemporalFields {
    let mut fields = TemporalFields::empty();
    let mut quoted = false;
    for c in pattern.chars() {
        if c == '\'' {
            quoted = !quoted;
        } else if !quoted {
            fields |= symbol_family(c).unwrap_or_else(TemporalFields::empty);
        }
    }
    fields
}

/// Capability required by a custom date/time pattern.
///
/// A zone dominates an offset; a pattern with no field symbol at all is a
/// literal in disguise and yields [`Capability::NoFormat`].
pub fn classify_date_pattern(pattern: &str) -> Capability {
    Capability::from_temporal_fields(scan_fields(pattern))
}
