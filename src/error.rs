use thiserror::Error;

use crate::{date::AlmanacDate, field::Field};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies a satellite block within a YUMA file
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BlockId {
    /// Block named by its PRN (ID line, or header marker)
    Prn(u8),
    /// 1-based block position in the file, when no PRN was recovered
    Position(usize),
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Prn(prn) => write!(f, "PRN-{:02}", prn),
            Self::Position(pos) => write!(f, "block #{}", pos),
        }
    }
}

/// Reason a satellite block could not be decoded
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BlockErrorKind {
    #[error("missing field(s): {}", list_fields(.0))]
    MissingFields(Vec<Field>),
    #[error("{field}: \"{value}\" is not a valid integer")]
    InvalidInteger { field: Field, value: String },
    #[error("{field}: \"{value}\" is not a valid number")]
    InvalidFloat { field: Field, value: String },
}

fn list_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One malformed satellite block. Local to that block:
/// it never aborts the parsing of the other blocks.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[error("{block}: {kind}")]
pub struct BlockError {
    pub block: BlockId,
    pub kind: BlockErrorKind,
}

/// File and retrieval level errors
#[derive(Error, Debug)]
pub enum Error {
    /// Not a single block of the file decoded correctly
    #[error("no valid almanac records ({} malformed block(s))", .0.len())]
    EmptyResult(Vec<BlockError>),
    /// Nothing published on the requested day nor in the lookback window
    #[error("no almanac available near {requested} (searched {} day(s) back to {})",
        .attempted.len(),
        .attempted.last().map(|d| d.to_string()).unwrap_or_default())]
    NotFound {
        requested: AlmanacDate,
        attempted: Vec<AlmanacDate>,
    },
    /// Infrastructure failure, after bounded retries
    #[error("transport failure for {candidate} (requested {requested}) after {attempts} attempt(s): {reason}")]
    Transport {
        requested: AlmanacDate,
        candidate: AlmanacDate,
        attempts: usize,
        reason: String,
    },
    #[error("invalid calendar date: {0}")]
    InvalidDate(String),
    #[error("i/o error")]
    IoError(#[from] std::io::Error),
    #[error("content is not valid utf-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn block_error_display() {
        let err = BlockError {
            block: BlockId::Prn(4),
            kind: BlockErrorKind::MissingFields(vec![Field::Af0, Field::Week]),
        };
        assert_eq!(err.to_string(), "PRN-04: missing field(s): Af0(s), week");

        let err = BlockError {
            block: BlockId::Position(3),
            kind: BlockErrorKind::InvalidInteger {
                field: Field::Health,
                value: "0.5".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "block #3: Health: \"0.5\" is not a valid integer"
        );
    }
}
