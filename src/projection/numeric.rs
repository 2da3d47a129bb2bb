//! Shared numeric helpers for the projection components

/// Floor a value at zero
#[inline]
pub fn floor_zero(value: f64) -> f64 {
    value.max(0.0)
}

/// Clamp a value into `[min, max]`
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Growth factor `(1 + rate)^years`
#[inline]
pub fn compound(rate: f64, years: u32) -> f64 {
    (1.0 + rate).powi(i32::try_from(years).unwrap_or(i32::MAX))
}

/// Round a currency amount to whole cents, half away from zero
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round a currency amount to whole units, as shown in summaries
pub fn round_whole(value: f64) -> f64 {
    value.round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compound() {
        assert_eq!(compound(0.05, 0), 1.0);
        assert_relative_eq!(compound(0.05, 2), 1.1025, epsilon = 1e-12);
        assert_eq!(compound(0.0, 30), 1.0);
        assert_eq!(compound(0.0, u32::MAX), 1.0);
        assert!(compound(0.05, u32::MAX).is_infinite());
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_cents(1234.565_1), 1234.57);
        assert_eq!(round_cents(-0.004), -0.0);
        assert_eq!(round_whole(1_234_567.5), 1_234_568.0);
    }

    #[test]
    fn test_floor_and_clamp() {
        assert_eq!(floor_zero(-3.0), 0.0);
        assert_eq!(floor_zero(3.0), 3.0);
        assert_eq!(clamp(150.0, 0.0, 100.0), 100.0);
        assert_eq!(clamp(-1.0, 0.0, 100.0), 0.0);
    }
}
