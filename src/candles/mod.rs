//! Candlestick aggregation.
//!
//! Samples arrive in file order (not sorted). Each distinct period label becomes
//! one candlestick, emitted in the order its label first appeared.

use std::collections::HashMap;

use crate::domain::{Candlestick, Sample};
use crate::error::CandleError;

pub mod filter;

pub use filter::*;

/// Reduce raw samples to one OHLC candlestick per period.
///
/// `open`/`close` are the first/last values seen for a period in input order;
/// `high`/`low` are its extremes. Fails with [`CandleError::EmptyInput`] when
/// there is nothing to aggregate.
pub fn compute_candlesticks(samples: &[Sample]) -> Result<Vec<Candlestick>, CandleError> {
    if samples.is_empty() {
        return Err(CandleError::EmptyInput);
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<Candlestick> = Vec::new();

    for sample in samples {
        match index.get(sample.period.as_str()) {
            Some(&i) => {
                let candle = &mut out[i];
                candle.high = candle.high.max(sample.value);
                candle.low = candle.low.min(sample.value);
                candle.close = sample.value;
            }
            None => {
                index.insert(sample.period.as_str(), out.len());
                out.push(Candlestick::new(
                    sample.period.clone(),
                    sample.value,
                    sample.value,
                    sample.value,
                    sample.value,
                ));
            }
        }
    }

    log::debug!("aggregated {} samples into {} candlesticks", samples.len(), out.len());
    Ok(out)
}
