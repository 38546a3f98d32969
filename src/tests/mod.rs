//! integrated tests
pub mod toolkit;

mod archive;
