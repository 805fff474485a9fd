//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - candlestick CSV export (`export`)
//! - candlestick JSON read/write (`candle_file`)

pub mod candle_file;
pub mod export;
pub mod ingest;

pub use candle_file::*;
pub use export::*;
pub use ingest::*;
