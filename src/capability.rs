//! Capability classification.
//!
//! A [`Capability`] is what a placeholder's declared kind demands from the
//! value plugged into it: nothing at all, a number, an integral count, a date,
//! a zoned instant, and so on. The classifier maps an argument-kind keyword and
//! its optional style text to exactly one capability.
//!
//! ```text
//! {n}                    -> None
//! {n, number, percent}   -> Number
//! {d, date, long}        -> Date
//! {t, time, full}        -> TimeWithZone
//! {d, date, 'at' HH:mm}  -> date_pattern.rs -> Time
//! {n, plural, ...}       -> Plural
//! ```
//!
//! Predefined `date` styles (`short` through `full`) never render time or zone
//! fields, so every `date` style classifies as `Date`. Only `time long|full`
//! carries a zone.
//!
//! Every consumer matches on `Capability` exhaustively (see `lattice.rs`), so a
//! new variant cannot be added without updating the compatibility tables and
//! the concrete-type mapping.

#[path = "capability/date_pattern.rs"]
mod date_pattern;

use std::fmt;

pub use date_pattern::classify_date_pattern;
pub(crate) use date_pattern::TemporalFields;

/// The formatting requirement of one placeholder occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    /// No formatting directive: accepts any value.
    None,
    Number,
    Date,
    Time,
    /// A fixed UTC offset without date or time fields.
    Offset,
    /// A named time zone without date or time fields.
    Zone,
    DateTime,
    DateWithOffset,
    TimeWithOffset,
    DateWithZone,
    TimeWithZone,
    DateTimeWithOffset,
    DateTimeWithZone,
    Duration,
    SpellOut,
    Ordinal,
    /// Legacy `choice` argument: numeric, discouraged.
    Choice,
    Plural,
    Select,
    SelectOrdinal,
    /// A date/time style that renders no field at all; the argument carries no data.
    NoFormat,
}

impl Capability {
    pub const ALL: [Capability; 21] = [
        Capability::None,
        Capability::Number,
        Capability::Date,
        Capability::Time,
        Capability::Offset,
        Capability::Zone,
        Capability::DateTime,
        Capability::DateWithOffset,
        Capability::TimeWithOffset,
        Capability::DateWithZone,
        Capability::TimeWithZone,
        Capability::DateTimeWithOffset,
        Capability::DateTimeWithZone,
        Capability::Duration,
        Capability::SpellOut,
        Capability::Ordinal,
        Capability::Choice,
        Capability::Plural,
        Capability::Select,
        Capability::SelectOrdinal,
        Capability::NoFormat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Capability::None => "None",
            Capability::Number => "Number",
            Capability::Date => "Date",
            Capability::Time => "Time",
            Capability::Offset => "Offset",
            Capability::Zone => "Zone",
            Capability::DateTime => "DateTime",
            Capability::DateWithOffset => "DateWithOffset",
            Capability::TimeWithOffset => "TimeWithOffset",
            Capability::DateWithZone => "DateWithZone",
            Capability::TimeWithZone => "TimeWithZone",
            Capability::DateTimeWithOffset => "DateTimeWithOffset",
            Capability::DateTimeWithZone => "DateTimeWithZone",
            Capability::Duration => "Duration",
            Capability::SpellOut => "SpellOut",
            Capability::Ordinal => "Ordinal",
            Capability::Choice => "Choice",
            Capability::Plural => "Plural",
            Capability::Select => "Select",
            Capability::SelectOrdinal => "SelectOrdinal",
            Capability::NoFormat => "NoFormat",
        }
    }

    /// Kinds that still resolve but should steer authors elsewhere.
    pub fn is_deprecated(self) -> bool {
        matches!(self, Capability::Choice)
    }

    /// Date/time fields this capability needs, or `None` for non-temporal capabilities.
    ///
    /// The compatibility tables in `lattice.rs` are checked against this model.
    #[cfg(test)]
    pub(crate) fn temporal_fields(self) -> Option<TemporalFields> {
        let fields = match self {
            Capability::Date => TemporalFields::DATE,
            Capability::Time => TemporalFields::TIME,
            Capability::Offset => TemporalFields::OFFSET,
            Capability::Zone => TemporalFields::OFFSET | TemporalFields::ZONE,
            Capability::DateTime => TemporalFields::DATE | TemporalFields::TIME,
            Capability::DateWithOffset => TemporalFields::DATE | TemporalFields::OFFSET,
            Capability::TimeWithOffset => TemporalFields::TIME | TemporalFields::OFFSET,
            Capability::DateWithZone => TemporalFields::DATE | TemporalFields::OFFSET | TemporalFields::ZONE,
            Capability::TimeWithZone => TemporalFields::TIME | TemporalFields::OFFSET | TemporalFields::ZONE,
            Capability::DateTimeWithOffset => TemporalFields::DATE | TemporalFields::TIME | TemporalFields::OFFSET,
            Capability::DateTimeWithZone => TemporalFields::all(),
            Capability::None
            | Capability::Number
            | Capability::Duration
            | Capability::SpellOut
            | Capability::Ordinal
            | Capability::Choice
            | Capability::Plural
            | Capability::Select
            | Capability::SelectOrdinal
            | Capability::NoFormat => return None,
        };
        Some(fields)
    }

    /// The temporal capability needing exactly `fields`.
    ///
    /// A zone always implies an offset; an empty set means the pattern renders
    /// no field and yields [`Capability::NoFormat`].
    pub(crate) fn from_temporal_fields(fields: TemporalFields) -> Capability {
        let date = fields.contains(TemporalFields::DATE);
        let time = fields.contains(TemporalFields::TIME);
        if fields.contains(TemporalFields::ZONE) {
            match (date, time) {
                (true, true) => Capability::DateTimeWithZone,
                (true, false) => Capability::DateWithZone,
                (false, true) => Capability::TimeWithZone,
                (false, false) => Capability::Zone,
            }
        } else if fields.contains(TemporalFields::OFFSET) {
            match (date, time) {
                (true, true) => Capability::DateTimeWithOffset,
                (true, false) => Capability::DateWithOffset,
                (false, true) => Capability::TimeWithOffset,
                (false, false) => Capability::Offset,
            }
        } else {
            match (date, time) {
                (true, true) => Capability::DateTime,
                (true, false) => Capability::Date,
                (false, true) => Capability::Time,
                (false, false) => Capability::NoFormat,
            }
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The kind keyword following an argument's identity (`{n, <kind>, ...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Number,
    Date,
    Time,
    Duration,
    Ordinal,
    SpellOut,
    Plural,
    Select,
    SelectOrdinal,
    Choice,
}

impl ArgKind {
    /// Match a kind keyword, ignoring ASCII case.
    pub fn from_keyword(word: &str) -> Option<ArgKind> {
        let kind = match word.to_ascii_lowercase().as_str() {
            "number" => ArgKind::Number,
            "date" => ArgKind::Date,
            "time" => ArgKind::Time,
            "duration" => ArgKind::Duration,
            "ordinal" => ArgKind::Ordinal,
            "spellout" => ArgKind::SpellOut,
            "plural" => ArgKind::Plural,
            "select" => ArgKind::Select,
            "selectordinal" => ArgKind::SelectOrdinal,
            "choice" => ArgKind::Choice,
            _ => return None,
        };
        Some(kind)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ArgKind::Number => "number",
            ArgKind::Date => "date",
            ArgKind::Time => "time",
            ArgKind::Duration => "duration",
            ArgKind::Ordinal => "ordinal",
            ArgKind::SpellOut => "spellout",
            ArgKind::Plural => "plural",
            ArgKind::Select => "select",
            ArgKind::SelectOrdinal => "selectordinal",
            ArgKind::Choice => "choice",
        }
    }

    /// Complex kinds carry branch bodies instead of a style string.
    pub fn is_complex(self) -> bool {
        matches!(self, ArgKind::Plural | ArgKind::Select | ArgKind::SelectOrdinal | ArgKind::Choice)
    }

    /// Kinds whose branches accept `=N` selectors, `offset:` and `#`.
    pub(crate) fn has_plural_style(self) -> bool {
        matches!(self, ArgKind::Plural | ArgKind::SelectOrdinal)
    }
}

/// Classify one argument from its kind keyword and optional style text.
///
/// `kind == None` is a bare `{name}` placeholder.
pub fn classify(kind: Option<ArgKind>, style: Option<&str>) -> Capability {
    let Some(kind) = kind else {
        return Capability::None;
    };
    match kind {
        ArgKind::Number => Capability::Number,
        ArgKind::Duration => Capability::Duration,
        ArgKind::Ordinal => Capability::Ordinal,
        ArgKind::SpellOut => Capability::SpellOut,
        ArgKind::Plural => Capability::Plural,
        ArgKind::Select => Capability::Select,
        ArgKind::SelectOrdinal => Capability::SelectOrdinal,
        ArgKind::Choice => Capability::Choice,
        ArgKind::Date => classify_temporal_style(style, Capability::Date, Capability::Date),
        ArgKind::Time => classify_temporal_style(style, Capability::Time, Capability::TimeWithZone),
    }
}

/// `short`/`medium` need the plain capability, `long`/`full` may add a zone,
/// anything else is a custom pattern or a `::` skeleton.
fn classify_temporal_style(style: Option<&str>, short: Capability, long: Capability) -> Capability {
    let Some(style) = style.map(str::trim).filter(|s| !s.is_empty()) else {
        return short;
    };
    match style.to_ascii_lowercase().as_str() {
        "short" | "medium" => short,
        "long" | "full" => long,
        _ => classify_date_pattern(style.strip_prefix("::").unwrap_or(style)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, Capability::None)]
    #[case(Some(ArgKind::Number), None, Capability::Number)]
    #[case(Some(ArgKind::Number), Some("integer"), Capability::Number)]
    #[case(Some(ArgKind::Number), Some("::currency/EUR"), Capability::Number)]
    #[case(Some(ArgKind::Duration), None, Capability::Duration)]
    #[case(Some(ArgKind::Ordinal), None, Capability::Ordinal)]
    #[case(Some(ArgKind::SpellOut), None, Capability::SpellOut)]
    #[case(Some(ArgKind::Plural), None, Capability::Plural)]
    #[case(Some(ArgKind::Select), None, Capability::Select)]
    #[case(Some(ArgKind::SelectOrdinal), None, Capability::SelectOrdinal)]
    #[case(Some(ArgKind::Choice), None, Capability::Choice)]
    fn simple_kinds(#[case] kind: Option<ArgKind>, #[case] style: Option<&str>, #[case] expected: Capability) {
        assert_eq!(classify(kind, style), expected);
    }

    #[rstest]
    #[case(None, Capability::Date)]
    #[case(Some("short"), Capability::Date)]
    #[case(Some("medium"), Capability::Date)]
    #[case(Some("long"), Capability::Date)]
    #[case(Some("FULL"), Capability::Date)]
    #[case(Some("  "), Capability::Date)]
    #[case(Some("yyyy-MM-dd HH:mm"), Capability::DateTime)]
    #[case(Some("::yMMMd"), Capability::Date)]
    fn date_styles(#[case] style: Option<&str>, #[case] expected: Capability) {
        assert_eq!(classify(Some(ArgKind::Date), style), expected);
    }

    #[rstest]
    #[case(None, Capability::Time)]
    #[case(Some("short"), Capability::Time)]
    #[case(Some(" medium "), Capability::Time)]
    #[case(Some("long"), Capability::TimeWithZone)]
    #[case(Some("full"), Capability::TimeWithZone)]
    #[case(Some("h:mm a"), Capability::Time)]
    #[case(Some("::jmm"), Capability::Time)]
    fn time_styles(#[case] style: Option<&str>, #[case] expected: Capability) {
        assert_eq!(classify(Some(ArgKind::Time), style), expected);
    }

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(ArgKind::from_keyword("PLURAL"), Some(ArgKind::Plural));
        assert_eq!(ArgKind::from_keyword("SelectOrdinal"), Some(ArgKind::SelectOrdinal));
        assert_eq!(ArgKind::from_keyword("money"), None);
    }

    #[test]
    fn temporal_fields_round_trip_through_capability() {
        for capability in Capability::ALL {
            if let Some(fields) = capability.temporal_fields() {
                assert_eq!(Capability::from_temporal_fields(fields), capability, "{capability}");
            }
        }
    }

    #[test]
    fn only_choice_is_deprecated() {
        let deprecated: Vec<_> = Capability::ALL.into_iter().filter(|c| c.is_deprecated()).collect();
        assert_eq!(deprecated, vec![Capability::Choice]);
    }
}
