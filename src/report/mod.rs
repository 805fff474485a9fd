//! Reporting utilities: candlestick tables, run summaries and trend rankings.

pub mod format;
pub mod trend;

pub use format::*;
pub use trend::*;
