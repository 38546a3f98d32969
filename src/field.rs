//! YUMA field identifiers and label matching.
//!
//! Publishers have shuffled the spacing and casing of the YUMA labels over
//! the years (`SQRT(A)  (m 1/2)` vs `SQRT(A) (m 1/2)`, `week` vs `Week`),
//! so labels are normalized and matched against a small pattern table
//! rather than compared verbatim.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the thirteen labeled lines of a YUMA block
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Field {
    /// Satellite PRN (integer)
    Id,
    /// 6-bit health word (integer)
    Health,
    Eccentricity,
    /// Time of applicability, seconds into the week
    TimeOfApplicability,
    OrbitalInclination,
    RateOfRightAscension,
    /// Square root of the semi major axis
    SqrtA,
    RightAscensionAtWeek,
    ArgumentOfPerigee,
    MeanAnomaly,
    Af0,
    Af1,
    /// Almanac week (integer, as published)
    Week,
}

enum Pattern {
    /// Normalized label must equal this
    Exact(&'static str),
    /// Normalized label must contain every keyword
    AllOf(&'static [&'static str]),
}

impl Pattern {
    fn matches(&self, normalized: &str) -> bool {
        match self {
            Self::Exact(name) => normalized == *name,
            Self::AllOf(keywords) => keywords.iter().all(|k| normalized.contains(k)),
        }
    }
}

/// Evaluated in order, first match wins: "rate of right ascen" must be
/// tested before "right ascen at week", and "week" only matches exactly
/// since "Right Ascen at Week" also contains it.
const LABEL_TABLE: &[(Field, &[Pattern])] = &[
    (
        Field::Id,
        &[
            Pattern::Exact("id"),
            Pattern::Exact("prn"),
            Pattern::Exact("svid"),
        ],
    ),
    (Field::Health, &[Pattern::AllOf(&["health"])]),
    (Field::Eccentricity, &[Pattern::AllOf(&["eccentr"])]),
    (
        Field::TimeOfApplicability,
        &[
            Pattern::AllOf(&["time", "applic"]),
            Pattern::Exact("toa"),
            Pattern::Exact("toa(s)"),
        ],
    ),
    (Field::OrbitalInclination, &[Pattern::AllOf(&["inclination"])]),
    (
        Field::RateOfRightAscension,
        &[Pattern::AllOf(&["rate", "right", "asc"])],
    ),
    (Field::SqrtA, &[Pattern::AllOf(&["sqrt"])]),
    (
        Field::RightAscensionAtWeek,
        &[Pattern::AllOf(&["right", "asc"])],
    ),
    (Field::ArgumentOfPerigee, &[Pattern::AllOf(&["perigee"])]),
    (Field::MeanAnomaly, &[Pattern::AllOf(&["mean", "anom"])]),
    (Field::Af0, &[Pattern::AllOf(&["af0"])]),
    (Field::Af1, &[Pattern::AllOf(&["af1"])]),
    (
        Field::Week,
        &[
            Pattern::Exact("week"),
            Pattern::Exact("weeknumber"),
            Pattern::Exact("wna"),
        ],
    ),
];

/// Lower case, all whitespace removed
fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

impl Field {
    /// Every field a YUMA block must carry, in publication order
    pub const ALL: [Field; 13] = [
        Field::Id,
        Field::Health,
        Field::Eccentricity,
        Field::TimeOfApplicability,
        Field::OrbitalInclination,
        Field::RateOfRightAscension,
        Field::SqrtA,
        Field::RightAscensionAtWeek,
        Field::ArgumentOfPerigee,
        Field::MeanAnomaly,
        Field::Af0,
        Field::Af1,
        Field::Week,
    ];

    /// Identifies the field described by a line label (text left of the colon).
    /// Returns None for labels we do not know about.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = normalize(label);
        if normalized.is_empty() {
            return None;
        }
        LABEL_TABLE
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| p.matches(&normalized)))
            .map(|(field, _)| *field)
    }

    /// True for fields that must decode as integers
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Id | Self::Health | Self::Week)
    }

    /// Label as written by the publisher, colon included
    pub fn label(&self) -> &'static str {
        match self {
            Self::Id => "ID:",
            Self::Health => "Health:",
            Self::Eccentricity => "Eccentricity:",
            Self::TimeOfApplicability => "Time of Applicability(s):",
            Self::OrbitalInclination => "Orbital Inclination(rad):",
            Self::RateOfRightAscension => "Rate of Right Ascen(r/s):",
            Self::SqrtA => "SQRT(A)  (m 1/2):",
            Self::RightAscensionAtWeek => "Right Ascen at Week(rad):",
            Self::ArgumentOfPerigee => "Argument of Perigee(rad):",
            Self::MeanAnomaly => "Mean Anom(rad):",
            Self::Af0 => "Af0(s):",
            Self::Af1 => "Af1(s/s):",
            Self::Week => "week:",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label().trim_end_matches(':'))
    }
}
