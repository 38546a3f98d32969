#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*
 * YUMA is part of the Geo-Rust framework.
 * Authors: Guillaume W. Bres <guillaume.bressaix@gmail.com> et al.
 * This framework is shipped under the Mozilla Public License v2.
 */

#[macro_use]
extern crate lazy_static;

pub mod archive;
pub mod date;
pub mod error;
pub mod field;
pub mod locator;
pub mod reader;
pub mod record;
pub mod table;

mod formatting;
mod parsing;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::{
        archive::{navcen_url, LocalArchive, NAVCEN_BASE_URL},
        date::{AlmanacDate, SECONDS_PER_WEEK, WEEK_ROLLOVER},
        error::{BlockError, BlockErrorKind, BlockId, Error},
        field::Field,
        locator::{Fetch, FetchError, Located, Locator, LocatorPolicy, Resolution},
        record::{AlmanacRecord, Health},
        table::{AlmanacTable, Anomaly},
    };
    // pub re-export
    pub use gnss_rs::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
}
