//! Buffered Reader wrapper, for efficient almanac reading
//! and integrated .gz decompression.
#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;
use std::{
    fs::File,
    io::{BufRead, BufReader, Error as IoError, Read},
    path::Path,
};

#[derive(Debug)]
pub enum BufferedReader {
    /// Readable (plain) file
    PlainFile(BufReader<File>),
    /// gzip compressed almanac
    #[cfg(feature = "flate2")]
    GzFile(BufReader<GzDecoder<File>>),
}

impl BufferedReader {
    /// Builds a new BufferedReader for efficient file interation,
    /// with possible .gz decompression
    pub fn new(path: &Path) -> std::io::Result<Self> {
        let gzip = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("gz"))
            .unwrap_or(false);
        if gzip {
            Self::gzip(path)
        } else {
            // Assumes no extra compression
            let f = File::open(path)?;
            Ok(Self::PlainFile(BufReader::new(f)))
        }
    }
    #[cfg(feature = "flate2")]
    fn gzip(path: &Path) -> std::io::Result<Self> {
        let f = File::open(path)?;
        Ok(Self::GzFile(BufReader::new(GzDecoder::new(f))))
    }
    #[cfg(not(feature = "flate2"))]
    fn gzip(_: &Path) -> std::io::Result<Self> {
        Err(IoError::new(
            std::io::ErrorKind::Unsupported,
            ".gz data requires --flate2 feature",
        ))
    }
}

impl Read for BufferedReader {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, IoError> {
        match self {
            Self::PlainFile(ref mut h) => h.read(buf),
            #[cfg(feature = "flate2")]
            Self::GzFile(ref mut h) => h.read(buf),
        }
    }
}

impl BufRead for BufferedReader {
    fn fill_buf(&mut self) -> Result<&[u8], IoError> {
        match self {
            Self::PlainFile(ref mut bufreader) => bufreader.fill_buf(),
            #[cfg(feature = "flate2")]
            Self::GzFile(ref mut bufreader) => bufreader.fill_buf(),
        }
    }
    fn consume(&mut self, s: usize) {
        match self {
            Self::PlainFile(ref mut bufreader) => bufreader.consume(s),
            #[cfg(feature = "flate2")]
            Self::GzFile(ref mut bufreader) => bufreader.consume(s),
        }
    }
}
