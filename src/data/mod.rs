//! Data sources beyond CSV ingest.
//!
//! - `sample`: reproducible synthetic weather files for demos and tests

pub mod sample;

pub use sample::*;
