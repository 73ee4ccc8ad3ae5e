//! Presentation rounding applied at result boundaries.

/// Rounds to the nearest integer, halves towards positive infinity.
///
/// Differs from [`f64::round`] only for negative halves: `-2.5` becomes `-2`.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Rounds to `decimals` places using [`round_half_up`].
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    round_half_up(x * scale) / scale
}
