//! Almanac table: one file worth of records
use itertools::Itertools;
use std::{
    io::{BufReader, Read},
    path::Path,
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    date::AlmanacDate,
    error::{BlockError, BlockId, Error},
    field::Field,
    parsing::parse_yuma,
    reader::BufferedReader,
    record::AlmanacRecord,
};

/// Warning level annotations. Anomalies never exclude a record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Anomaly {
    /// Same PRN decoded more than once
    DuplicatePrn { prn: u8 },
    /// Record week differs from the table week (first record)
    WeekMismatch { prn: u8, week: u16, expected: u16 },
    /// Value outside of its expected range
    OutOfRange { prn: u8, field: Field, value: f64 },
    /// Header marker quotes a PRN or week the block body disagrees with
    HeaderMismatch {
        block: BlockId,
        field: Field,
        header: u16,
        body: u16,
    },
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::DuplicatePrn { prn } => write!(f, "PRN-{:02} listed more than once", prn),
            Self::WeekMismatch {
                prn,
                week,
                expected,
            } => write!(f, "PRN-{:02}: week {} (expecting {})", prn, week, expected),
            Self::OutOfRange { prn, field, value } => {
                write!(f, "PRN-{:02}: {} {:E} out of expected range", prn, field, value)
            },
            Self::HeaderMismatch {
                block,
                field,
                header,
                body,
            } => write!(f, "{}: header {} {} but block says {}", block, field, header, body),
        }
    }
}

/// [AlmanacTable] is the result of parsing one YUMA file:
/// decoded records in file order, errors of the blocks that
/// could not be decoded, and advisory anomalies.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlmanacTable {
    /// Publication date, when known
    pub date: Option<AlmanacDate>,
    /// Decoded records, in file order
    pub records: Vec<AlmanacRecord>,
    /// Blocks that failed to decode
    pub errors: Vec<BlockError>,
    /// Warning level annotations
    pub anomalies: Vec<Anomaly>,
}

impl AlmanacTable {
    /// Parses YUMA content. Fails only when not a single block decoded,
    /// malformed blocks are otherwise reported in [Self::errors].
    pub fn parse(content: &str) -> Result<Self, Error> {
        parse_yuma(content)
    }
    /// Parses raw bytes, which must be valid UTF-8
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let content = String::from_utf8(bytes.to_vec())?;
        Self::parse(&content)
    }
    /// Parses YUMA content from any [Read]able I/O
    pub fn from_reader<R: Read>(reader: &mut BufReader<R>) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::parse(&content)
    }
    /// Parses a local YUMA file, gzip compressed files (.gz) are supported
    /// with the `flate2` feature. The publication date is recovered from
    /// the file name when it follows the `yumaAlmanac_YYYY-MM-DD` convention.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let mut reader = BufferedReader::new(path)?;
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let table = Self::parse(&content)?;
        let date = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(AlmanacDate::from_filename);
        Ok(table.with_date_opt(date))
    }
    /// Copies and stamps this table with a publication date
    pub fn with_date(&self, date: AlmanacDate) -> Self {
        let mut s = self.clone();
        s.date = Some(date);
        s
    }
    fn with_date_opt(mut self, date: Option<AlmanacDate>) -> Self {
        if date.is_some() {
            self.date = date;
        }
        self
    }
    /// Number of decoded records
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    /// Iterates records in file order
    pub fn iter(&self) -> std::slice::Iter<'_, AlmanacRecord> {
        self.records.iter()
    }
    /// Almanac week, as published (first record)
    pub fn week(&self) -> Option<u16> {
        self.records.first().map(|r| r.week)
    }
    /// Returns the first record of given PRN
    pub fn get(&self, prn: u8) -> Option<&AlmanacRecord> {
        self.records.iter().find(|r| r.prn == prn)
    }
    /// Sorted and unique PRNs
    pub fn prns(&self) -> Vec<u8> {
        self.records.iter().map(|r| r.prn).sorted().dedup().collect()
    }
    /// Iterates records flagging no degradation
    pub fn healthy(&self) -> impl Iterator<Item = &AlmanacRecord> + '_ {
        self.records.iter().filter(|r| r.is_healthy())
    }
    /// True when every block decoded and nothing was flagged
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.anomalies.is_empty()
    }
}

impl FromStr for AlmanacTable {
    type Err = Error;
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Self::parse(content)
    }
}

impl<'a> IntoIterator for &'a AlmanacTable {
    type Item = &'a AlmanacRecord;
    type IntoIter = std::slice::Iter<'a, AlmanacRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
