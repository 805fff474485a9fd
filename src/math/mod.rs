//! Numeric helpers: grid normalization and ordinary least squares.

pub mod normalize;
pub mod ols;

pub use normalize::*;
pub use ols::*;
