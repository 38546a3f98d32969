use crate::prelude::*;
use rand::{distributions::Alphanumeric, Rng};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

/// Test resources root
pub fn data_dir() -> PathBuf {
    PathBuf::new().join(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Path to a YUMA test resource
pub fn yuma_resource(name: &str) -> PathBuf {
    data_dir().join("YUMA").join(name)
}

/// Reads a YUMA test resource
pub fn yuma_content(name: &str) -> String {
    std::fs::read_to_string(yuma_resource(name)).unwrap()
}

/*
 * Tool to generate random names when we need to produce a file
 */
pub fn random_name(size: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(size)
        .map(char::from)
        .collect()
}

/// Creates a uniquely named, empty directory under the system temp dir
pub fn scratch_dir() -> PathBuf {
    let path = std::env::temp_dir().join(format!("yuma-{}", random_name(8)));
    std::fs::create_dir_all(&path).unwrap();
    path
}

/// Copies a YUMA resource into `{archive}/{year}/Yuma/{doy:03}.alm`
pub fn archive_resource(archive: &Path, year: i32, doy: u16, name: &str) {
    let dir = archive.join(year.to_string()).join("Yuma");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::copy(yuma_resource(name), dir.join(format!("{:03}.alm", doy))).unwrap();
}

/// Scripted [Fetch]er: every (year, doy) not scripted is not found.
/// Scripted outcomes are served in order, the last one repeats.
#[derive(Debug, Default)]
pub struct MockFetcher {
    script: HashMap<(i32, u16), Vec<Result<Vec<u8>, FetchError>>>,
    /// Every (year, doy) fetched, in order
    pub calls: Vec<(i32, u16)>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }
    /// Serves `content` on given day
    pub fn with_content(mut self, year: i32, doy: u16, content: &[u8]) -> Self {
        self.script
            .entry((year, doy))
            .or_default()
            .push(Ok(content.to_vec()));
        self
    }
    /// Fails on given day with a transport error
    pub fn with_transport_error(mut self, year: i32, doy: u16, reason: &str) -> Self {
        self.script
            .entry((year, doy))
            .or_default()
            .push(Err(FetchError::Transport(reason.to_string())));
        self
    }
    /// Number of fetch attempts on given day
    pub fn calls_to(&self, year: i32, doy: u16) -> usize {
        self.calls.iter().filter(|c| **c == (year, doy)).count()
    }
}

impl Fetch for MockFetcher {
    fn fetch(&mut self, year: i32, day_of_year: u16) -> Result<Vec<u8>, FetchError> {
        self.calls.push((year, day_of_year));
        let outcomes = match self.script.get_mut(&(year, day_of_year)) {
            Some(outcomes) => outcomes,
            None => return Err(FetchError::NotFound),
        };
        if outcomes.len() > 1 {
            outcomes.remove(0)
        } else {
            outcomes[0].clone()
        }
    }
}

/// Verifications any well formed almanac table should pass
pub fn generic_almanac_test(table: &AlmanacTable) {
    assert!(!table.is_empty(), "empty table");
    let week = table.week().unwrap();
    for record in table.iter() {
        assert!(record.prn > 0 && record.prn <= 32, "bad PRN {}", record.prn);
        assert_eq!(record.week, week, "PRN-{:02}: week mismatch", record.prn);
        assert!(record.eccentricity >= 0.0 && record.eccentricity < 0.03);
        assert!(record.time_of_applicability_s < SECONDS_PER_WEEK);
        assert!(record.inclination_rad > 0.9 && record.inclination_rad < 1.0);
        assert!(record.rate_of_right_ascension_rad_s < 0.0);
        let a_km = record.semi_major_axis_m() / 1.0E3;
        assert!(a_km > 26_000.0 && a_km < 27_000.0, "semi major axis {}", a_km);
        assert!(record.af0_s.abs() < 1.0E-3);
        assert!(record.af1_s_per_s.abs() < 1.0E-10);
        assert_eq!(record.sv().constellation, Constellation::GPS);
        assert_eq!(record.sv().prn, record.prn);
    }
}
