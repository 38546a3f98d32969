//! Almanac retrieval: date resolution and bounded fallback search.
//!
//! Publishers do not issue an almanac every single day, so a missing file
//! on the requested day is followed by a search over the preceding days.
//! Transport failures are a different matter: they are retried on the same
//! day, and never taken as "nothing published".
use log::{debug, error, warn};
use thiserror::Error;

use crate::{date::AlmanacDate, error::Error, table::AlmanacTable};

/// Failures a [Fetch] implementation may report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Nothing published for this day (HTTP 404 like)
    #[error("resource not found")]
    NotFound,
    /// Connection / timeout like failure
    #[error("transport error: {0}")]
    Transport(String),
}

/// Retrieves raw almanac files, named by (year, day of year).
/// Timeouts and cancellation are up to the implementation.
pub trait Fetch {
    fn fetch(&mut self, year: i32, day_of_year: u16) -> Result<Vec<u8>, FetchError>;
}

impl<F> Fetch for F
where
    F: FnMut(i32, u16) -> Result<Vec<u8>, FetchError>,
{
    fn fetch(&mut self, year: i32, day_of_year: u16) -> Result<Vec<u8>, FetchError> {
        self(year, day_of_year)
    }
}

/// Retry and fallback policy
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LocatorPolicy {
    /// Preceding days searched when nothing is published on the requested day
    pub lookback_days: u16,
    /// Total attempts per day on transport failures (at least one)
    pub transport_attempts: u8,
}

impl Default for LocatorPolicy {
    fn default() -> Self {
        Self {
            lookback_days: 7,
            transport_attempts: 3,
        }
    }
}

impl LocatorPolicy {
    /// Copies and returns Self with updated lookback window
    pub fn with_lookback_days(&self, days: u16) -> Self {
        let mut s = *self;
        s.lookback_days = days;
        s
    }
    /// Copies and returns Self with updated transport attempts
    pub fn with_transport_attempts(&self, attempts: u8) -> Self {
        let mut s = *self;
        s.transport_attempts = attempts.max(1);
        s
    }
}

/// A date, expressed the way publishers name their files
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub date: AlmanacDate,
    pub year: i32,
    /// 1-based day of year
    pub day_of_year: u16,
    /// Full GPS week
    pub gps_week: u32,
}

impl Resolution {
    pub fn new(date: AlmanacDate) -> Self {
        Self {
            date,
            year: date.year(),
            day_of_year: date.day_of_year(),
            gps_week: date.gps_week(),
        }
    }
    /// GPS week, truncated the way YUMA almanacs publish it
    pub fn week_mod1024(&self) -> u16 {
        self.date.gps_week_mod1024()
    }
}

/// A successfully retrieved almanac file
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    /// Date the caller asked for
    pub requested: AlmanacDate,
    /// Date the file was actually published for
    pub resolution: Resolution,
    /// Raw file content
    pub content: Vec<u8>,
    /// Total number of fetch attempts
    pub attempts: usize,
}

impl Located {
    /// True when a preceding day had to be used
    pub fn is_fallback(&self) -> bool {
        self.resolution.date != self.requested
    }
    /// Parses the retrieved content, stamped with its publication date
    pub fn parse(&self) -> Result<AlmanacTable, Error> {
        let table = AlmanacTable::from_bytes(&self.content)?;
        Ok(table.with_date(self.resolution.date))
    }
}

#[derive(Debug)]
enum State {
    Resolving(AlmanacDate),
    Fetching {
        candidate: Resolution,
        offset: u16,
        transport_failures: u8,
    },
    NotFoundRetry {
        next: Resolution,
        offset: u16,
    },
    TransportRetry {
        candidate: Resolution,
        offset: u16,
        transport_failures: u8,
        reason: String,
    },
    Success(Located),
    Failed(Error),
}

/// Bookkeeping of one search
struct Search {
    requested: AlmanacDate,
    attempted: Vec<AlmanacDate>,
    attempts: usize,
}

/// [Locator] resolves a date to its published almanac file.
pub struct Locator<F: Fetch> {
    fetcher: F,
    policy: LocatorPolicy,
}

impl<F: Fetch> Locator<F> {
    /// Builds a [Locator] with default [LocatorPolicy]
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            policy: LocatorPolicy::default(),
        }
    }
    /// Copies and returns Self with updated policy
    pub fn with_policy(mut self, policy: LocatorPolicy) -> Self {
        self.policy = policy;
        self
    }
    pub fn policy(&self) -> &LocatorPolicy {
        &self.policy
    }
    /// Releases the fetch capability
    pub fn into_inner(self) -> F {
        self.fetcher
    }
    /// Expresses a date the way publishers name their files
    pub fn resolve(&self, date: AlmanacDate) -> Resolution {
        Resolution::new(date)
    }
    /// Retrieves the almanac published for `date`, or for the closest
    /// preceding day within the lookback window.
    pub fn locate(&mut self, date: AlmanacDate) -> Result<Located, Error> {
        let mut search = Search {
            requested: date,
            attempted: Vec::with_capacity(self.policy.lookback_days as usize + 1),
            attempts: 0,
        };
        let mut state = State::Resolving(date);
        loop {
            state = match state {
                State::Success(located) => return Ok(located),
                State::Failed(e) => {
                    error!("{}", e);
                    return Err(e);
                },
                state => self.step(state, &mut search),
            };
        }
    }
    /// Retrieves and parses the almanac published for `date`
    /// (or the closest preceding day).
    pub fn retrieve(&mut self, date: AlmanacDate) -> Result<AlmanacTable, Error> {
        self.locate(date)?.parse()
    }
    fn step(&mut self, state: State, search: &mut Search) -> State {
        match state {
            State::Resolving(date) => State::Fetching {
                candidate: self.resolve(date),
                offset: 0,
                transport_failures: 0,
            },
            State::Fetching {
                candidate,
                offset,
                transport_failures,
            } => {
                search.attempts += 1;
                if !search.attempted.contains(&candidate.date) {
                    search.attempted.push(candidate.date);
                }
                debug!(
                    "fetching {} ({}/{:03})",
                    candidate.date, candidate.year, candidate.day_of_year
                );
                let outcome = match self.fetcher.fetch(candidate.year, candidate.day_of_year) {
                    Ok(content) if content.iter().all(|b| b.is_ascii_whitespace()) => {
                        debug!("{}: empty content", candidate.date);
                        Err(FetchError::NotFound)
                    },
                    outcome => outcome,
                };
                match outcome {
                    Ok(content) => State::Success(Located {
                        requested: search.requested,
                        resolution: candidate,
                        content,
                        attempts: search.attempts,
                    }),
                    Err(FetchError::NotFound) => {
                        if offset < self.policy.lookback_days {
                            let offset = offset + 1;
                            State::NotFoundRetry {
                                next: self.resolve(search.requested.days_before(offset)),
                                offset,
                            }
                        } else {
                            State::Failed(Error::NotFound {
                                requested: search.requested,
                                attempted: search.attempted.clone(),
                            })
                        }
                    },
                    Err(FetchError::Transport(reason)) => {
                        let transport_failures = transport_failures + 1;
                        if transport_failures < self.policy.transport_attempts {
                            State::TransportRetry {
                                candidate,
                                offset,
                                transport_failures,
                                reason,
                            }
                        } else {
                            State::Failed(Error::Transport {
                                requested: search.requested,
                                candidate: candidate.date,
                                attempts: transport_failures as usize,
                                reason,
                            })
                        }
                    },
                }
            },
            State::NotFoundRetry { next, offset } => {
                debug!("nothing published, falling back to {}", next.date);
                State::Fetching {
                    candidate: next,
                    offset,
                    transport_failures: 0,
                }
            },
            State::TransportRetry {
                candidate,
                offset,
                transport_failures,
                reason,
            } => {
                warn!(
                    "{}: {} (attempt {}/{})",
                    candidate.date, reason, transport_failures, self.policy.transport_attempts
                );
                State::Fetching {
                    candidate,
                    offset,
                    transport_failures,
                }
            },
            terminal => terminal,
        }
    }
}
