use proptest::prelude::*;

use weather_candles::candles::{compute_candlesticks, filter_by_close_range, filter_by_year_range};
use weather_candles::domain::Sample;
use weather_candles::math::normalize;

fn samples() -> impl Strategy<Value = Vec<Sample>> {
    prop::collection::vec((1980i32..=2019, -40.0f64..45.0), 1..200)
        .prop_map(|rows| rows.into_iter().map(|(y, v)| Sample::new(y.to_string(), v)).collect())
}

proptest! {
    #[test]
    fn candle_bodies_sit_inside_their_wicks(samples in samples()) {
        let candles = compute_candlesticks(&samples).unwrap();
        for c in &candles {
            prop_assert!(c.low <= c.open.min(c.close));
            prop_assert!(c.open.max(c.close) <= c.high);
        }

        // One candle per distinct period, first-seen order.
        let mut seen: Vec<&str> = Vec::new();
        for s in &samples {
            if !seen.contains(&s.period.as_str()) {
                seen.push(&s.period);
            }
        }
        let periods: Vec<&str> = candles.iter().map(|c| c.period.as_str()).collect();
        prop_assert_eq!(periods, seen);
    }

    #[test]
    fn single_sample_is_flat(year in 1980i32..=2019, v in -40.0f64..45.0) {
        let candles = compute_candlesticks(&[Sample::new(year.to_string(), v)]).unwrap();
        prop_assert_eq!(candles.len(), 1);
        let c = &candles[0];
        prop_assert!(c.open == v && c.high == v && c.low == v && c.close == v);
    }

    #[test]
    fn filters_are_idempotent_and_commute(
        samples in samples(),
        a in 1980i32..=2019,
        b in 1980i32..=2019,
        lo in -40.0f64..45.0,
        hi in -40.0f64..45.0,
    ) {
        let (start, end) = (a.min(b), a.max(b));
        let (min, max) = (lo.min(hi), lo.max(hi));
        let candles = compute_candlesticks(&samples).unwrap();

        let by_year = filter_by_year_range(&candles, start, end);
        prop_assert_eq!(&filter_by_year_range(&by_year, start, end), &by_year);

        let by_close = filter_by_close_range(&candles, min, max);
        prop_assert_eq!(&filter_by_close_range(&by_close, min, max), &by_close);

        prop_assert_eq!(
            filter_by_close_range(&by_year, min, max),
            filter_by_year_range(&by_close, start, end)
        );
    }

    #[test]
    fn normalize_stays_in_bounds(
        v in -100.0f64..100.0,
        lo in -50.0f64..0.0,
        span in 0.001f64..80.0,
        height in 1usize..60,
    ) {
        let hi = lo + span;
        let row = normalize(v, lo, hi, height);
        prop_assert!(row < height);
        prop_assert_eq!(normalize(lo, lo, hi, height), 0);
        prop_assert_eq!(normalize(hi, lo, hi, height), height - 1);
    }
}
