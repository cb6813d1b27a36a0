//! Half-point (0–5) rating derived from the 0–10 scale.
//!
//! The derivation always floors to the lower half point: 7.9 becomes
//! 3.5, never 4.0. Badges that look half a point "too low" near a
//! boundary are correct.

use crate::domain::services::field_normalizer;

/// Derive the half-point value from a 0–10 rating.
///
/// Missing input stays missing; it never collapses to 0.
pub fn simplify(rating: Option<f64>) -> Option<f64> {
    rating.map(|r| ((r / 2.0) * 2.0).floor() / 2.0)
}

/// Format a half-point value the way the file stores it: plain integer
/// text when whole, comma-decimal otherwise ("4", "3,5").
pub fn format_simplified(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value).replace('.', ",")
    }
}

/// True when a stored simplified-rating cell disagrees with the value
/// recomputed from the raw 0–10 rating. Absent on either side is never
/// a discrepancy.
pub fn is_discrepant(stored: &str, raw_rating: Option<f64>) -> bool {
    match (field_normalizer::parse_rating(stored), simplify(raw_rating)) {
        (Some(stored), Some(expected)) => (stored - expected).abs() > 1e-9,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplify_floors_to_lower_half_point() {
        assert_eq!(simplify(Some(7.9)), Some(3.5));
        assert_eq!(simplify(Some(7.0)), Some(3.5));
        assert_eq!(simplify(Some(6.9)), Some(3.0));
    }

    #[test]
    fn test_simplify_exact_boundaries() {
        assert_eq!(simplify(Some(8.0)), Some(4.0));
        assert_eq!(simplify(Some(0.0)), Some(0.0));
        assert_eq!(simplify(Some(10.0)), Some(5.0));
    }

    #[test]
    fn test_simplify_is_always_a_half_point_in_range() {
        let mut r = 0.0;
        while r <= 10.0 {
            let s = simplify(Some(r)).unwrap();
            assert!((0.0..=5.0).contains(&s), "out of range for {}", r);
            assert_eq!((s * 2.0).fract(), 0.0, "not a half point for {}", r);
            r += 0.1;
        }
    }

    #[test]
    fn test_simplify_missing_stays_missing() {
        assert_eq!(simplify(None), None);
    }

    #[test]
    fn test_format_whole_and_half_values() {
        assert_eq!(format_simplified(4.0), "4");
        assert_eq!(format_simplified(3.5), "3,5");
        assert_eq!(format_simplified(0.0), "0");
        assert_eq!(format_simplified(0.5), "0,5");
    }

    #[test]
    fn test_discrepancy_detection() {
        // Stored "4" but 7.9 simplifies to 3.5
        assert!(is_discrepant("4", Some(7.9)));
        assert!(!is_discrepant("3,5", Some(7.9)));
        assert!(!is_discrepant("4", Some(8.0)));
        // Either side missing is not a discrepancy
        assert!(!is_discrepant("", Some(7.9)));
        assert!(!is_discrepant("4", None));
        assert!(!is_discrepant("n/a", Some(7.9)));
    }
}
