//! Capability lattice and argument-type resolution.
//!
//! Every occurrence of an argument, in every variant, contributes one
//! [`Capability`]. Resolution folds them into the single most general
//! capability that satisfies all of them, then maps that to a concrete
//! [`ArgumentType`].
//!
//! ## Compatibility tables
//!
//! For a capability `x`, [`compatible_capabilities`] lists the capabilities
//! whose values also satisfy `x`, from least to most informative. The relation
//! is not symmetric:
//!
//! ```text
//! Date  ── satisfied by ──▶ DateTime, DateWithOffset, ..., DateTimeWithZone
//! DateTime ── satisfied by ──▶ DateTimeWithOffset, DateTimeWithZone   (not Date)
//! ```
//!
//! Temporal capabilities are ordered by the fields they need (date, time,
//! offset, zone) and form a complete lattice under field union. Numeric ones
//! form two mutually compatible classes, `{Number, SpellOut, Choice}` below
//! `{Plural, Ordinal, SelectOrdinal}`. `None` is satisfied by everything.
//!
//! ## Fold
//!
//! ```text
//! most_specific(a, b):
//!   a == b                   -> a
//!   each satisfies the other -> the preferred one (Number, then SpellOut, then Choice;
//!                               Plural, then Ordinal, then SelectOrdinal)
//!   a satisfies b            -> a
//!   b satisfies a            -> b
//!   otherwise                -> first of compat(a) that is also in compat(b), or failure
//! ```
//!
//! Because each list is ordered by information content, the first common
//! entry is the least upper bound. Ties inside a numeric class always settle on
//! the same member, so the fold yields the same [`Capability`] for any order of
//! its inputs; `lattice/tests.rs` checks this over every ordered triple.


use crate::Capability;
use std::fmt;

/// Concrete type of a generated accessor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    /// No requirement: any displayable value.
    Any,
    Number,
    Integer,
    Text,
    Date,
    Time,
    DateTime,
    Offset,
    OffsetTime,
    OffsetDateTime,
    ZonedDateTime,
    Duration,
    /// Uninhabited: the placeholder renders no data.
    Nothing,
}

impl ArgumentType {
    pub fn name(self) -> &'static str {
        match self {
            ArgumentType::Any => "Any",
            ArgumentType::Number => "Number",
            ArgumentType::Integer => "Integer",
            ArgumentType::Text => "Text",
            ArgumentType::Date => "Date",
            ArgumentType::Time => "Time",
            ArgumentType::DateTime => "DateTime",
            ArgumentType::Offset => "Offset",
            ArgumentType::OffsetTime => "OffsetTime",
            ArgumentType::OffsetDateTime => "OffsetDateTime",
            ArgumentType::ZonedDateTime => "ZonedDateTime",
            ArgumentType::Duration => "Duration",
            ArgumentType::Nothing => "Nothing",
        }
    }

    pub fn is_uninhabited(self) -> bool {
        self == ArgumentType::Nothing
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Capability {
    /// Concrete type that satisfies this capability.
    pub fn argument_type(self) -> ArgumentType {
        match self {
            Capability::None => ArgumentType::Any,
            Capability::Number | Capability::SpellOut | Capability::Choice => ArgumentType::Number,
            Capability::Plural | Capability::Ordinal | Capability::SelectOrdinal => ArgumentType::Integer,
            Capability::Select => ArgumentType::Text,
            Capability::Date => ArgumentType::Date,
            Capability::Time => ArgumentType::Time,
            Capability::DateTime => ArgumentType::DateTime,
            Capability::Offset => ArgumentType::Offset,
            Capability::TimeWithOffset => ArgumentType::OffsetTime,
            Capability::DateWithOffset | Capability::DateTimeWithOffset => ArgumentType::OffsetDateTime,
            Capability::Zone
            | Capability::DateWithZone
            | Capability::TimeWithZone
            | Capability::DateTimeWithZone => ArgumentType::ZonedDateTime,
            Capability::Duration => ArgumentType::Duration,
            Capability::NoFormat => ArgumentType::Nothing,
        }
    }
}

/// Capabilities whose values also satisfy `capability`, least informative first.
///
/// `capability` itself is never listed.
pub(crate) fn compatible_capabilities(capability: Capability) -> &'static [Capability] {
    use Capability::*;

    match capability {
        None => &[
            Number,
            Date,
            Time,
            Offset,
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
            Choice,
            Plural,
            Select,
            SelectOrdinal,
            NoFormat,
        ],

        // Numeric: any number, then integral.
        Number => &[SpellOut, Choice, Plural, Ordinal, SelectOrdinal],
        SpellOut => &[Number, Choice, Plural, Ordinal, SelectOrdinal],
        Choice => &[Number, SpellOut, Plural, Ordinal, SelectOrdinal],
        Plural => &[Ordinal, SelectOrdinal],
        Ordinal => &[Plural, SelectOrdinal],
        SelectOrdinal => &[Plural, Ordinal],

        // Temporal, by number of fields.
        Date => &[DateTime, DateWithOffset, DateTimeWithOffset, DateWithZone, DateTimeWithZone],
        Time => &[DateTime, TimeWithOffset, DateTimeWithOffset, TimeWithZone, DateTimeWithZone],
        Offset => &[
            DateWithOffset,
            TimeWithOffset,
            Zone,
            DateTimeWithOffset,
            DateWithZone,
            TimeWithZone,
            DateTimeWithZone,
        ],
        Zone => &[DateWithZone, TimeWithZone, DateTimeWithZone],
        DateTime => &[DateTimeWithOffset, DateTimeWithZone],
        DateWithOffset => &[DateTimeWithOffset, DateWithZone, DateTimeWithZone],
        TimeWithOffset => &[DateTimeWithOffset, TimeWithZone, DateTimeWithZone],
        DateWithZone => &[DateTimeWithZone],
        TimeWithZone => &[DateTimeWithZone],
        DateTimeWithOffset => &[DateTimeWithZone],
        DateTimeWithZone => &[],

        Duration => &[],
        Select => &[],
        NoFormat => &[],
    }
}

/// True when a value satisfying `candidate` also satisfies `requirement`.
pub(crate) fn satisfies(candidate: Capability, requirement: Capability) -> bool {
    candidate == requirement || compatible_capabilities(requirement).contains(&candidate)
}

/// Most specific capability satisfying both `a` and `b`, if any.
pub fn most_specific(a: Capability, b: Capability) -> Option<Capability> {
    match (satisfies(a, b), satisfies(b, a)) {
        (true, true) if tie_rank(b) < tie_rank(a) => Some(b),
        (true, _) => Some(a),
        (false, true) => Some(b),
        (false, false) => {
            let others = compatible_capabilities(b);
            compatible_capabilities(a).iter().copied().find(|candidate| others.contains(candidate))
        }
    }
}

/// Order inside a class of mutually compatible capabilities; lower wins.
fn tie_rank(capability: Capability) -> u8 {
    match capability {
        Capability::SpellOut | Capability::Ordinal => 1,
        Capability::Choice | Capability::SelectOrdinal => 2,
        // Number and Plural lead their classes; nothing else ever ties.
        _ => 0,
    }
}

/// Fold every capability observed for one argument; `None` when the list is
/// empty or no single capability satisfies all of them.
pub fn resolve_capability(capabilities: &[Capability]) -> Option<Capability> {
    let (first, rest) = capabilities.split_first()?;
    rest.iter().try_fold(*first, |acc, next| most_specific(acc, *next))
}

/// Concrete type for an argument observed with `capabilities`.
///
/// ```text
/// [Date]          -> Date
/// [Date, Time]    -> DateTime
/// [Date, Plural]  -> None
/// ```
pub fn resolve_argument_type(capabilities: &[Capability]) -> Option<ArgumentType> {
    resolve_capability(capabilities).map(Capability::argument_type)
}
