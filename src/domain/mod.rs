//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw observations (`Sample`) and aggregated `Candlestick`s
//! - validated filter bounds (`YearRange`, `TempRange`)
//! - the country display-name table (`CountryNames`)

pub mod countries;
pub mod types;

pub use countries::*;
pub use types::*;
