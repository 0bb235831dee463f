//! Logistic spending/progress curve shared by cost distribution and progress tracking.

pub const STEEPNESS: f64 = 10.0;
pub const MIDPOINT: f64 = 0.5;

/// Raw logistic value `1 / (1 + e^(-k(t - t0)))`.
pub fn logistic(t: f64) -> f64 {
    1.0 / (1.0 + (-STEEPNESS * (t - MIDPOINT)).exp())
}

/// Logistic curve rescaled so that `s_curve(0) == 0` and `s_curve(1) == 1`.
///
/// Inputs outside `[0, 1]` are clamped.
pub fn s_curve(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let low = logistic(0.0);
    let high = logistic(1.0);
    (logistic(t) - low) / (high - low)
}

/// Share of the curve that falls between `from` and `to`.
pub fn s_curve_delta(from: f64, to: f64) -> f64 {
    s_curve(to) - s_curve(from)
}
