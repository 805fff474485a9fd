//! Ordinary least squares for a single regressor.
//!
//! We fit `y ≈ slope * x + intercept` with the closed-form normal equations:
//!
//! ```text
//! slope     = (n·Σxy − Σx·Σy)  / (n·Σx² − (Σx)²)
//! intercept = (Σy·Σx² − Σx·Σxy) / (n·Σx² − (Σx)²)
//! ```
//!
//! No weighting, no outlier handling.

use crate::error::CandleError;

/// Fitted line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionModel {
    pub slope: f64,
    pub intercept: f64,
    /// Number of observations used in the fit.
    pub n: usize,
}

impl RegressionModel {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through `(x, y)` points.
///
/// Fails with [`CandleError::InsufficientData`] for no points and
/// [`CandleError::DegenerateFit`] when every `x` is identical.
pub fn fit_line(points: &[(f64, f64)]) -> Result<RegressionModel, CandleError> {
    if points.is_empty() {
        return Err(CandleError::InsufficientData);
    }

    let n = points.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for &(x, y) in points {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return Err(CandleError::DegenerateFit { n: points.len() });
    }

    Ok(RegressionModel {
        slope: (n * sum_xy - sum_x * sum_y) / denominator,
        intercept: (sum_y * sum_x2 - sum_x * sum_xy) / denominator,
        n: points.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_exact_line() {
        // y = 2 + 3x on x = [0,1,2]
        let model = fit_line(&[(0.0, 2.0), (1.0, 5.0), (2.0, 8.0)]).unwrap();
        assert!((model.slope - 3.0).abs() < 1e-12);
        assert!((model.intercept - 2.0).abs() < 1e-12);
        assert_eq!(model.n, 3);
        assert!((model.predict(10.0) - 32.0).abs() < 1e-12);
    }

    #[test]
    fn least_squares_through_noisy_points() {
        let model = fit_line(&[(0.0, 1.0), (1.0, 0.0), (2.0, 3.0), (3.0, 2.0)]).unwrap();
        assert!((model.slope - 0.6).abs() < 1e-12);
        assert!((model.intercept - 0.6).abs() < 1e-12);
        // The fitted line passes through the centroid.
        assert!((model.predict(1.5) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn empty_and_degenerate_inputs_fail() {
        assert_eq!(fit_line(&[]), Err(CandleError::InsufficientData));
        assert_eq!(
            fit_line(&[(2000.0, 1.0), (2000.0, 3.0)]),
            Err(CandleError::DegenerateFit { n: 2 })
        );
        assert_eq!(
            fit_line(&[(2000.0, 1.0)]),
            Err(CandleError::DegenerateFit { n: 1 })
        );
    }
}
