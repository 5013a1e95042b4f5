//! Numeric helpers shared by the sensor collaborators.

/// Above this magnitude every `f64` is already a whole number.
const EXACT_INTEGER: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round to two decimal places, halves away from zero.
///
/// A scaled value within a few ULPs of a half counts as a half, so inputs
/// written with three decimals round the way they read: `round2(1.005)` is
/// `1.01` even though `1.005` is stored as `1.00499999...`. Values too large
/// to carry a fraction, NaN and infinities are returned unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() || libm::fabs(scaled) >= EXACT_INTEGER {
        return value;
    }
    let whole = libm::fabs(libm::trunc(scaled));
    let frac = libm::fabs(scaled) - whole;
    let tolerance = 4.0 * f64::EPSILON * libm::fabs(scaled).max(1.0);
    let tie = libm::fabs(frac - 0.5) <= tolerance;
    let magnitude = if tie || frac > 0.5 { whole + 1.0 } else { whole };
    libm::copysign(magnitude, value) / 100.0
}
