//! YUMA content decoding.
//!
//! A YUMA file is a sequence of blocks, one per satellite:
//! ```text
//! ******** Week 326 almanac for PRN-01 ********
//! ID:                         01
//! Health:                     000
//! Eccentricity:               0.1234567E-002
//! (..)
//! week:                        326
//! ```
//! Each block is decoded on its own: a malformed block is reported
//! and skipped, the other blocks are still decoded.
use log::{debug, error, warn};
use regex::Regex;
use std::{collections::HashMap, str::FromStr};

use crate::{
    date::SECONDS_PER_WEEK,
    error::{BlockError, BlockErrorKind, BlockId, Error},
    field::Field,
    record::{AlmanacRecord, Health},
    table::{AlmanacTable, Anomaly},
};

lazy_static! {
    static ref HEADER_PRN: Regex = Regex::new(r"(?i)PRN[\s\-_#:]*(\d+)").unwrap();
    static ref HEADER_WEEK: Regex = Regex::new(r"(?i)\bWEEK\s*(\d+)").unwrap();
}

/// Advisory ranges: values outside of these are flagged, never rejected
const ECCENTRICITY_RANGE: (f64, f64) = (0.0, 0.03);
const SQRT_A_RANGE: (f64, f64) = (5000.0, 5300.0);

/// Header marker: run of '*' quoting a PRN
fn is_block_header(line: &str) -> bool {
    line.starts_with("**") && HEADER_PRN.is_match(line)
}

fn header_value(re: &Regex, line: &str) -> Option<u16> {
    let caps = re.captures(line)?;
    u16::from_str(&caps[1]).ok()
}

/// Decodes fixed point or scientific notation,
/// Fortran `D` exponents are tolerated.
pub(crate) fn parse_float(content: &str) -> Option<f64> {
    let value = f64::from_str(&content.replace(&['D', 'd'][..], "E")).ok()?;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// Raw content of one satellite block, prior decoding
#[derive(Debug, Default)]
struct Block {
    /// 1-based position in the file
    position: usize,
    /// PRN quoted by the header marker
    header_prn: Option<u16>,
    /// Week quoted by the header marker
    header_week: Option<u16>,
    values: HashMap<Field, String>,
}

impl Block {
    fn new(position: usize) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
    fn from_header(position: usize, line: &str) -> Self {
        Self {
            position,
            header_prn: header_value(&HEADER_PRN, line),
            header_week: header_value(&HEADER_WEEK, line),
            values: HashMap::new(),
        }
    }
    fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }
    fn insert(&mut self, field: Field, value: &str) {
        if let Some(prev) = self.values.insert(field, value.to_string()) {
            warn!(
                "block #{}: \"{}\" listed twice, \"{}\" replaced by \"{}\"",
                self.position, field, prev, value
            );
        }
    }
    /// Names this block as precisely as we can
    fn id(&self) -> BlockId {
        if let Some(prn) = self
            .values
            .get(&Field::Id)
            .and_then(|v| u8::from_str(v).ok())
        {
            return BlockId::Prn(prn);
        }
        match self.header_prn.and_then(|prn| u8::try_from(prn).ok()) {
            Some(prn) => BlockId::Prn(prn),
            None => BlockId::Position(self.position),
        }
    }
    fn integer<T: FromStr>(&self, field: Field) -> Result<T, BlockErrorKind> {
        let value = &self.values[&field];
        T::from_str(value).map_err(|_| BlockErrorKind::InvalidInteger {
            field,
            value: value.clone(),
        })
    }
    fn float(&self, field: Field) -> Result<f64, BlockErrorKind> {
        let value = &self.values[&field];
        parse_float(value).ok_or_else(|| BlockErrorKind::InvalidFloat {
            field,
            value: value.clone(),
        })
    }
    /// Decodes this block into a record and its anomalies
    fn decode(&self) -> Result<(AlmanacRecord, Vec<Anomaly>), BlockError> {
        let block = self.id();

        let missing = Field::ALL
            .iter()
            .filter(|f| !self.contains(**f))
            .copied()
            .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(BlockError {
                block,
                kind: BlockErrorKind::MissingFields(missing),
            });
        }

        let record = self
            .record()
            .map_err(|kind| BlockError { block, kind })?;

        let mut anomalies = Vec::new();

        if let Some(prn) = self.header_prn {
            if prn != record.prn as u16 {
                anomalies.push(Anomaly::HeaderMismatch {
                    block,
                    field: Field::Id,
                    header: prn,
                    body: record.prn as u16,
                });
            }
        }
        if let Some(week) = self.header_week {
            if week != record.week {
                anomalies.push(Anomaly::HeaderMismatch {
                    block,
                    field: Field::Week,
                    header: week,
                    body: record.week,
                });
            }
        }

        anomalies.extend(range_anomalies(&record));
        Ok((record, anomalies))
    }
    fn record(&self) -> Result<AlmanacRecord, BlockErrorKind> {
        Ok(AlmanacRecord {
            prn: self.integer::<u8>(Field::Id)?,
            health: Health::from(self.integer::<u8>(Field::Health)?),
            eccentricity: self.float(Field::Eccentricity)?,
            time_of_applicability_s: self.float(Field::TimeOfApplicability)?,
            inclination_rad: self.float(Field::OrbitalInclination)?,
            rate_of_right_ascension_rad_s: self.float(Field::RateOfRightAscension)?,
            sqrt_a_m_half: self.float(Field::SqrtA)?,
            right_ascension_rad: self.float(Field::RightAscensionAtWeek)?,
            argument_of_perigee_rad: self.float(Field::ArgumentOfPerigee)?,
            mean_anomaly_rad: self.float(Field::MeanAnomaly)?,
            af0_s: self.float(Field::Af0)?,
            af1_s_per_s: self.float(Field::Af1)?,
            week: self.integer::<u16>(Field::Week)?,
        })
    }
}

fn range_anomalies(record: &AlmanacRecord) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();
    let mut check = |field: Field, value: f64, in_range: bool| {
        if !in_range {
            anomalies.push(Anomaly::OutOfRange {
                prn: record.prn,
                field,
                value,
            });
        }
    };

    let e = record.eccentricity;
    check(
        Field::Eccentricity,
        e,
        e >= ECCENTRICITY_RANGE.0 && e <= ECCENTRICITY_RANGE.1,
    );

    let toa = record.time_of_applicability_s;
    check(
        Field::TimeOfApplicability,
        toa,
        (0.0..SECONDS_PER_WEEK).contains(&toa),
    );

    let sqrt_a = record.sqrt_a_m_half;
    check(
        Field::SqrtA,
        sqrt_a,
        sqrt_a >= SQRT_A_RANGE.0 && sqrt_a <= SQRT_A_RANGE.1,
    );

    let health = record.health.bits();
    check(Field::Health, health as f64, health <= Health::MAX);

    anomalies
}

/// Collects decoded records and block errors
#[derive(Debug, Default)]
struct Accumulator {
    records: Vec<AlmanacRecord>,
    errors: Vec<BlockError>,
    anomalies: Vec<Anomaly>,
}

impl Accumulator {
    fn close(&mut self, block: Option<Block>) {
        let block = match block {
            Some(block) => block,
            None => return,
        };
        match block.decode() {
            Ok((record, anomalies)) => {
                debug!("{}: decoded", block.id());
                for anomaly in anomalies.iter() {
                    warn!("{}", anomaly);
                }
                self.records.push(record);
                self.anomalies.extend(anomalies);
            },
            Err(e) => {
                error!("{}", e);
                self.errors.push(e);
            },
        }
    }
    /// Table level checks, then wraps up
    fn finish(mut self) -> Result<AlmanacTable, Error> {
        if self.records.is_empty() {
            return Err(Error::EmptyResult(self.errors));
        }

        let expected = self.records[0].week;
        let mut seen = Vec::<u8>::with_capacity(self.records.len());

        for record in self.records.iter() {
            if seen.contains(&record.prn) {
                let anomaly = Anomaly::DuplicatePrn { prn: record.prn };
                warn!("{}", anomaly);
                self.anomalies.push(anomaly);
            } else {
                seen.push(record.prn);
            }
            if record.week != expected {
                let anomaly = Anomaly::WeekMismatch {
                    prn: record.prn,
                    week: record.week,
                    expected,
                };
                warn!("{}", anomaly);
                self.anomalies.push(anomaly);
            }
        }

        Ok(AlmanacTable {
            date: None,
            records: self.records,
            errors: self.errors,
            anomalies: self.anomalies,
        })
    }
}

/// Decodes YUMA content into an [AlmanacTable]
pub(crate) fn parse_yuma(content: &str) -> Result<AlmanacTable, Error> {
    let mut acc = Accumulator::default();
    let mut block: Option<Block> = None;
    let mut position = 0;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if is_block_header(line) {
            acc.close(block.take());
            position += 1;
            block = Some(Block::from_header(position, line));
            continue;
        }

        let (label, value) = match line.rsplit_once(':') {
            Some((label, value)) => (label, value.trim()),
            None => {
                debug!("ignored line \"{}\"", line);
                continue;
            },
        };

        let field = match Field::from_label(label) {
            Some(field) => field,
            None => {
                debug!("ignored label \"{}\"", label.trim());
                continue;
            },
        };

        // files stripped of their header markers: ID opens a new block
        if field == Field::Id && block.as_ref().map_or(true, |b| b.contains(Field::Id)) {
            acc.close(block.take());
            position += 1;
            block = Some(Block::new(position));
        }

        match block.as_mut() {
            Some(block) => block.insert(field, value),
            None => debug!("\"{}\" outside of any block", line),
        }
    }

    acc.close(block.take());
    acc.finish()
}
