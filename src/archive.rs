//! Local almanac archive, laid out like the NAVCEN mirror.
use log::debug;
use std::{
    io::{ErrorKind, Read},
    path::{Path, PathBuf},
};

use crate::{
    locator::{Fetch, FetchError},
    reader::BufferedReader,
};

/// USCG NAVCEN almanac root
pub const NAVCEN_BASE_URL: &str = "https://navcen.uscg.gov/sites/default/files/gps/almanac";

/// Returns the NAVCEN URL of the YUMA almanac published on given day.
/// ```
/// use yuma::prelude::navcen_url;
/// assert_eq!(
///     navcen_url(2024, 61),
///     "https://navcen.uscg.gov/sites/default/files/gps/almanac/2024/Yuma/061.alm",
/// );
/// ```
pub fn navcen_url(year: i32, day_of_year: u16) -> String {
    format!("{}/{}", NAVCEN_BASE_URL, relative_path(year, day_of_year))
}

/// `{year}/Yuma/{doy:03}.alm`
fn relative_path(year: i32, day_of_year: u16) -> String {
    format!("{}/Yuma/{:03}.alm", year, day_of_year)
}

/// [LocalArchive] serves almanacs stored under
/// `{root}/{year}/Yuma/{doy:03}.alm`. Gzip compressed files
/// (`.alm.gz`) are also served with the `flate2` feature.
#[derive(Debug, Clone)]
pub struct LocalArchive {
    root: PathBuf,
}

impl LocalArchive {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
    pub fn root(&self) -> &Path {
        &self.root
    }
    /// Path of the (plain) almanac published on given day
    pub fn path(&self, year: i32, day_of_year: u16) -> PathBuf {
        self.root.join(relative_path(year, day_of_year))
    }
    fn candidates(&self, year: i32, day_of_year: u16) -> Vec<PathBuf> {
        let plain = self.path(year, day_of_year);
        let mut candidates = vec![plain.clone()];
        if cfg!(feature = "flate2") {
            let mut gz = plain.into_os_string();
            gz.push(".gz");
            candidates.push(PathBuf::from(gz));
        }
        candidates
    }
}

impl Fetch for LocalArchive {
    fn fetch(&mut self, year: i32, day_of_year: u16) -> Result<Vec<u8>, FetchError> {
        for path in self.candidates(year, day_of_year) {
            let mut reader = match BufferedReader::new(&path) {
                Ok(reader) => reader,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("\"{}\" does not exist", path.display());
                    continue;
                },
                Err(e) => {
                    return Err(FetchError::Transport(format!(
                        "\"{}\": {}",
                        path.display(),
                        e
                    )))
                },
            };
            let mut content = Vec::new();
            reader
                .read_to_end(&mut content)
                .map_err(|e| FetchError::Transport(format!("\"{}\": {}", path.display(), e)))?;
            return Ok(content);
        }
        Err(FetchError::NotFound)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn archive_paths() {
        let archive = LocalArchive::new("/data/almanacs");
        assert_eq!(
            archive.path(2024, 5),
            PathBuf::from("/data/almanacs/2024/Yuma/005.alm")
        );
        assert_eq!(
            navcen_url(2023, 365),
            "https://navcen.uscg.gov/sites/default/files/gps/almanac/2023/Yuma/365.alm"
        );
    }
}
