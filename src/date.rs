//! Calendar dates, as used by almanac publishers.
use hifitime::{Duration, Epoch, TimeScale};
use regex::Regex;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::Error;

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap();
}

/// Seconds in one GPS week
pub const SECONDS_PER_WEEK: f64 = 604_800.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Legacy GPS week counters wrap every 1024 weeks
pub const WEEK_ROLLOVER: u32 = 1024;

/// Start of GPS time, 1980-01-06 at midnight
fn gps_epoch() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(1980, 1, 6)
}

/// [AlmanacDate] is a calendar day (UTC).
///
/// The underlying [Epoch] is anchored at noon, so that stepping
/// whole days, or counting them, is never disturbed by leap seconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlmanacDate(Epoch);

impl AlmanacDate {
    /// Builds a date from gregorian calendar values,
    /// fails on non existing dates (2023-02-29..)
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self, Error> {
        let epoch = Epoch::maybe_from_gregorian(year, month, day, 12, 0, 0, 0, TimeScale::UTC)
            .map_err(|_| Error::InvalidDate(format!("{:04}-{:02}-{:02}", year, month, day)))?;
        Ok(Self(epoch))
    }
    /// Returns the calendar day (UTC) of any [Epoch]
    pub fn from_epoch(epoch: Epoch) -> Self {
        let (y, m, d, _, _, _, _) = epoch.to_gregorian_utc();
        Self(Epoch::from_gregorian_utc(y, m, d, 12, 0, 0, 0))
    }
    /// Recovers a date from a file name following the
    /// `yumaAlmanac_YYYY-MM-DD.alm` convention
    pub fn from_filename(name: &str) -> Option<Self> {
        let caps = ISO_DATE.captures(name)?;
        let y = i32::from_str(&caps[1]).ok()?;
        let m = u8::from_str(&caps[2]).ok()?;
        let d = u8::from_str(&caps[3]).ok()?;
        Self::from_ymd(y, m, d).ok()
    }
    /// (year, month, day)
    pub fn ymd(&self) -> (i32, u8, u8) {
        let (y, m, d, _, _, _, _) = self.0.to_gregorian_utc();
        (y, m, d)
    }
    pub fn year(&self) -> i32 {
        self.ymd().0
    }
    /// 1-based day of year, as used in publisher file names
    pub fn day_of_year(&self) -> u16 {
        let jan1 = Epoch::from_gregorian_utc_at_midnight(self.year(), 1, 1);
        let elapsed = (self.0 - jan1).to_seconds();
        (elapsed / SECONDS_PER_DAY).floor() as u16 + 1
    }
    /// Full GPS week number (never truncated)
    pub fn gps_week(&self) -> u32 {
        let elapsed = (self.0 - gps_epoch()).to_seconds();
        (elapsed / SECONDS_PER_WEEK).floor() as u32
    }
    /// GPS week number truncated modulo 1024,
    /// the way YUMA almanacs publish it
    pub fn gps_week_mod1024(&self) -> u16 {
        (self.gps_week() % WEEK_ROLLOVER) as u16
    }
    /// Returns the day before
    pub fn previous(&self) -> Self {
        Self::from_epoch(self.0 - Duration::from_days(1.0))
    }
    /// Returns the date `days` earlier
    pub fn days_before(&self, days: u16) -> Self {
        Self::from_epoch(self.0 - Duration::from_days(days as f64))
    }
    /// Midnight (UTC) of this day
    pub fn to_epoch(&self) -> Epoch {
        let (y, m, d) = self.ymd();
        Epoch::from_gregorian_utc_at_midnight(y, m, d)
    }
}

impl From<Epoch> for AlmanacDate {
    fn from(epoch: Epoch) -> Self {
        Self::from_epoch(epoch)
    }
}

impl std::fmt::Display for AlmanacDate {
    /// Formats as YYYY-MM-DD
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{:04}-{:02}-{:02}", y, m, d)
    }
}

impl FromStr for AlmanacDate {
    type Err = Error;
    /// Parses YYYY-MM-DD
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || Error::InvalidDate(s.to_string());
        let mut items = s.split('-');
        let y = items.next().ok_or_else(invalid)?;
        let m = items.next().ok_or_else(invalid)?;
        let d = items.next().ok_or_else(invalid)?;
        if items.next().is_some() || y.len() != 4 {
            return Err(invalid());
        }
        let y = i32::from_str(y).map_err(|_| invalid())?;
        let m = u8::from_str(m).map_err(|_| invalid())?;
        let d = u8::from_str(d).map_err(|_| invalid())?;
        Self::from_ymd(y, m, d)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn gps_week_and_doy() {
        for (y, m, d, week, week1024, doy) in [
            (1980, 1, 6, 0, 0, 6),
            (2016, 12, 31, 1929, 905, 366),
            (2017, 1, 1, 1930, 906, 1),
            (2019, 4, 6, 2047, 1023, 96),
            (2019, 4, 7, 2048, 0, 97),
            (2024, 1, 1, 2295, 247, 1),
            (2024, 3, 1, 2303, 255, 61),
            (2025, 1, 1, 2347, 299, 1),
        ] {
            let date = AlmanacDate::from_ymd(y, m, d).unwrap();
            assert_eq!(date.gps_week(), week, "{}", date);
            assert_eq!(date.gps_week_mod1024(), week1024, "{}", date);
            assert_eq!(date.day_of_year(), doy, "{}", date);
            assert_eq!(date.ymd(), (y, m, d));
        }
    }
    #[test]
    fn stepping_back() {
        let date = AlmanacDate::from_ymd(2017, 1, 1).unwrap();
        assert_eq!(date.previous().to_string(), "2016-12-31");
        assert_eq!(date.previous().previous().to_string(), "2016-12-30");
        assert_eq!(date.days_before(7).to_string(), "2016-12-25");
        assert_eq!(date.days_before(0), date);

        let date = AlmanacDate::from_ymd(2024, 3, 1).unwrap();
        assert_eq!(date.previous().to_string(), "2024-02-29");
    }
    #[test]
    fn parsing() {
        let date = AlmanacDate::from_str("2024-03-01").unwrap();
        assert_eq!(date.ymd(), (2024, 3, 1));
        assert_eq!(date.to_string(), "2024-03-01");

        for invalid in ["", "2024", "2024-03", "24-03-01", "2024-13-01", "2023-02-29", "2024-03-01-02"]
        {
            assert!(
                AlmanacDate::from_str(invalid).is_err(),
                "\"{}\" should not parse",
                invalid
            );
        }
    }
    #[test]
    fn from_filename() {
        let date = AlmanacDate::from_filename("yumaAlmanac_2024-03-01.alm").unwrap();
        assert_eq!(date.ymd(), (2024, 3, 1));
        assert!(AlmanacDate::from_filename("061.alm").is_none());
        assert!(AlmanacDate::from_filename("yumaAlmanac_2024-02-30.alm").is_none());
    }
    #[test]
    fn from_epoch() {
        let epoch = Epoch::from_gregorian_utc(2024, 3, 1, 23, 59, 59, 0);
        let date = AlmanacDate::from(epoch);
        assert_eq!(date.to_string(), "2024-03-01");
        assert_eq!(date.to_epoch(), Epoch::from_gregorian_utc_at_midnight(2024, 3, 1));
    }
}
