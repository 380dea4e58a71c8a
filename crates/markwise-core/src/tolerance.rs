//! Percent-error tolerance comparison.

/// Percent error below this floor always matches, whatever tolerance the
/// question configures. It accepts rounding artifacts like `1/3` against a
/// stored `0.333` even at zero tolerance.
pub const ABSOLUTE_TOLERANCE_FLOOR: f64 = 0.2;

/// When the correct value is zero the percent-error formula is undefined;
/// fall back to absolute error with the floor read as an absolute epsilon.
const ZERO_EPSILON: f64 = 0.002;

/// Whether `submitted` matches `correct` within `pct_tolerance` percent
/// error (or within the fixed absolute floor).
pub fn numbers_match(correct: f64, submitted: f64, pct_tolerance: f64) -> bool {
    if !correct.is_finite() || !submitted.is_finite() {
        return false;
    }
    if correct == 0.0 {
        return submitted.abs() < ZERO_EPSILON;
    }
    let percent_error = (100.0 * (submitted - correct) / correct).abs();
    percent_error < pct_tolerance || percent_error < ABSOLUTE_TOLERANCE_FLOOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_configured_tolerance() {
        assert!(numbers_match(100.0, 104.0, 5.0));
        assert!(numbers_match(100.0, 96.0, 5.0));
    }

    #[test]
    fn outside_configured_tolerance() {
        assert!(!numbers_match(100.0, 106.0, 5.0));
        assert!(!numbers_match(100.0, 94.0, 5.0));
    }

    #[test]
    fn boundary_is_exclusive() {
        // Exactly 5% error does not match a 5% tolerance.
        assert!(!numbers_match(100.0, 105.0, 5.0));
    }

    #[test]
    fn absolute_floor_overrides_zero_tolerance() {
        // 1/3 submitted against a stored 0.3333: ~0.01% error.
        assert!(numbers_match(0.3333, 1.0 / 3.0, 0.0));
        assert!(numbers_match(100.0, 100.1, 0.0));
        assert!(!numbers_match(100.0, 100.3, 0.0));
    }

    #[test]
    fn exact_match_always_passes() {
        assert!(numbers_match(42.0, 42.0, 0.0));
        assert!(numbers_match(-7.5, -7.5, 0.0));
    }

    #[test]
    fn negative_values_compare_by_magnitude_of_error() {
        assert!(numbers_match(-100.0, -104.0, 5.0));
        assert!(!numbers_match(-100.0, -106.0, 5.0));
        assert!(!numbers_match(100.0, -100.0, 5.0));
    }

    #[test]
    fn zero_correct_value_uses_absolute_error() {
        assert!(numbers_match(0.0, 0.0, 0.0));
        assert!(numbers_match(0.0, 0.001, 0.0));
        assert!(!numbers_match(0.0, 0.1, 5.0));
        assert!(!numbers_match(0.0, 1.0, 50.0));
    }

    #[test]
    fn non_finite_values_never_match() {
        assert!(!numbers_match(f64::NAN, 1.0, 5.0));
        assert!(!numbers_match(1.0, f64::NAN, 5.0));
        assert!(!numbers_match(f64::INFINITY, f64::INFINITY, 5.0));
    }
}
