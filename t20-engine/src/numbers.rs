//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

use crate::constants::BALLS_PER_OVER;

/// Clamp a f64 into `[min, max]`, mapping NaN to `min`.
///
/// `min` must not exceed `max`; callers pass constant or pre-ordered bounds.
#[must_use]
pub fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

/// Normalize a 0-100 skill rating to `[0, 1]`, capping uncapped growth at 100.
#[must_use]
pub fn skill_unit(skill: u8) -> f64 {
    f64::from(skill.min(100)) / 100.0
}

/// Round a f64 and clamp it to the u8 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    let clamped = value.clamp(0.0, f64::from(u8::MAX)).round();
    cast::<f64, u8>(clamped).unwrap_or(0)
}

/// Ceil a f64 and clamp it to the u16 range, returning 0 for non-finite values.
#[must_use]
pub fn ceil_f64_to_u16(value: f64) -> u16 {
    if !value.is_finite() {
        return 0;
    }
    let clamped = value.clamp(0.0, f64::from(u16::MAX)).ceil();
    cast::<f64, u16>(clamped).unwrap_or(0)
}

/// Convert a usize count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Decimal overs for a count of legal balls (117 balls is 19.5 overs).
#[must_use]
pub fn decimal_overs(legal_balls: u32) -> f64 {
    f64::from(legal_balls) / f64::from(BALLS_PER_OVER)
}

/// Round to one decimal place.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
