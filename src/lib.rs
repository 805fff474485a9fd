//! `weather-candles` library crate.
//!
//! The binary (`wx`) is a thin wrapper around this library so that:
//!
//! - core logic (aggregation, filters, normalisation, regression) is testable
//!   without spawning processes
//! - the text chart renderer is pure and can be reused by other front-ends
//! - I/O and terminal handling stay at the edges

pub mod app;
pub mod candles;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
