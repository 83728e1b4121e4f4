//! Zero-default numeric coercion at form-field boundaries.
//!
//! Billing screens accept free-text numeric input. The domain rule is that a
//! field which is empty or not a number contributes **zero**; data entry is
//! never rejected at the engine level. Every numeric field boundary in the
//! workspace funnels through the two helpers here so the zero-default policy
//! is a single decision, not a scattered set of inline fallbacks.

/// Parse a raw field value, treating anything unparseable as zero.
///
/// Input is trimmed first. A numeric prefix with trailing garbage (`"12abc"`)
/// does not parse; the whole token must be a number. Non-finite results
/// (`"inf"`, `"NaN"`) also collapse to zero.
pub fn parse_or_zero(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Collapse a missing or non-finite value to zero.
pub fn or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(parse_or_zero("42"), 42.0);
        assert_eq!(parse_or_zero("3.5"), 3.5);
        assert_eq!(parse_or_zero("  10.25  "), 10.25);
        assert_eq!(parse_or_zero("-2"), -2.0);
    }

    #[test]
    fn empty_and_garbage_become_zero() {
        assert_eq!(parse_or_zero(""), 0.0);
        assert_eq!(parse_or_zero("   "), 0.0);
        assert_eq!(parse_or_zero("abc"), 0.0);
        assert_eq!(parse_or_zero("12abc"), 0.0);
    }

    #[test]
    fn non_finite_becomes_zero() {
        assert_eq!(parse_or_zero("inf"), 0.0);
        assert_eq!(parse_or_zero("NaN"), 0.0);
        assert_eq!(or_zero(Some(f64::NAN)), 0.0);
        assert_eq!(or_zero(Some(f64::INFINITY)), 0.0);
    }

    #[test]
    fn or_zero_passes_finite_values_through() {
        assert_eq!(or_zero(Some(12.5)), 12.5);
        assert_eq!(or_zero(None), 0.0);
    }
}
