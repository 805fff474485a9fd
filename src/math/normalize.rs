//! Value → grid-row mapping for the text plotter.

/// Map `value` in `[min_value, max_value]` to a row in `[0, scale_height - 1]`.
///
/// Row 0 is `min_value`, row `scale_height - 1` is `max_value`. The result is
/// rounded to the nearest row and clamped, so slight floating-point overshoot
/// (or values outside the domain) stay on the grid. A degenerate domain
/// (`min_value == max_value`) always maps to row 0.
pub fn normalize(value: f64, min_value: f64, max_value: f64, scale_height: usize) -> usize {
    if scale_height == 0 || max_value == min_value {
        return 0;
    }
    let top = (scale_height - 1) as f64;
    let scaled = (value - min_value) / (max_value - min_value) * top;
    if scaled.is_nan() {
        return 0;
    }
    scaled.round().clamp(0.0, top) as usize
}
