//! Small numeric helpers shared by the scorer, the comparator and the binaries

use crate::error::{EngineError, Result};

/// True for finite, non-negative amounts
pub fn is_valid_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Reject negative or non-finite amounts at the boundary
pub(crate) fn require_amount(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(EngineError::invalid(field, format!("must be finite, got {}", value)));
    }
    if value < 0.0 {
        return Err(EngineError::invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

/// Same as `require_amount` but also rejects zero
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<()> {
    require_amount(field, value)?;
    if value == 0.0 {
        return Err(EngineError::invalid(field, "must be greater than zero"));
    }
    Ok(())
}

/// Replace negative or non-finite values by zero
pub(crate) fn sanitize(value: f64) -> f64 {
    if is_valid_amount(value) {
        value
    } else {
        0.0
    }
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Format an amount with comma thousands separators and no decimals
///
/// Presentation stays locale-free: the renderer owns currency symbols.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_amounts() {
        assert!(is_valid_amount(0.0));
        assert!(is_valid_amount(1_000.5));
        assert!(!is_valid_amount(-1.0));
        assert!(!is_valid_amount(f64::NAN));
        assert!(!is_valid_amount(f64::INFINITY));
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("principal", 10.0).is_ok());
        assert!(require_positive("principal", 0.0).is_err());
        assert!(require_positive("principal", -5.0).is_err());
        assert!(require_positive("principal", f64::NAN).is_err());
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(12.5), 12.5);
        assert_eq!(sanitize(-3.0), 0.0);
        assert_eq!(sanitize(f64::NAN), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2_003_794.8765, 2), 2_003_794.88);
        assert_eq!(round_to(0.125, 0), 0.0);
        assert_eq!(round_to(-1.555, 1), -1.6);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1_000.0), "1,000");
        assert_eq!(format_grouped(2_003_794.9), "2,003,795");
        assert_eq!(format_grouped(-100_000_000.0), "-100,000,000");
    }
}
