//! Display formatting for evaluated numbers
//!
//! Formatting is a presentation step only; callers that compute with a
//! result must use the `f64`, never the string.
//!
//! Integral values print through `itoa` (no fractional part, like a pocket
//! calculator), everything else through `ryu` (shortest round-trip form).

/// Default calculator display width in characters
pub const DISPLAY_WIDTH: usize = 12;

/// Integral values below this magnitude print without a fractional part
const INTEGRAL_LIMIT: f64 = 1e15;

/// Format a number in its shortest exact form.
///
/// ```
/// use pocketcalc_eval::format::format_number;
///
/// assert_eq!(format_number(4.0), "4");
/// assert_eq!(format_number(-0.25), "-0.25");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < INTEGRAL_LIMIT {
        let mut buffer = itoa::Buffer::new();
        // -0.0 prints as 0
        return buffer.format(value as i64).to_string();
    }
    let mut buffer = ryu::Buffer::new();
    buffer.format(value).to_string()
}

/// Format a number for the calculator display, truncated to `width` characters.
pub fn format_display(value: f64, width: usize) -> String {
    truncate_chars(&format_number(value), width)
}

/// Keep at most `width` characters of `text`.
pub fn truncate_chars(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Format with a fixed number of decimal places (converter results, tick labels).
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_values() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(120.0), "120");
        assert_eq!(format_number(-42.0), "-42");
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(0.1), "0.1");
    }

    #[test]
    fn test_display_truncation() {
        let shown = format_display(std::f64::consts::PI, DISPLAY_WIDTH);
        assert_eq!(shown, "3.1415926535");
        assert_eq!(shown.chars().count(), 12);

        assert_eq!(format_display(2.0 / 3.0, DISPLAY_WIDTH), "0.6666666666");
        assert_eq!(format_display(12.5, DISPLAY_WIDTH), "12.5");
    }

    #[test]
    fn test_large_integral_uses_float_form() {
        assert_eq!(format_number(1e20), "1e20");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(format_fixed(273.15, 2), "273.15");
        assert_eq!(format_fixed(1.0 / 3.0, 2), "0.33");
        assert_eq!(format_fixed(-2.0, 2), "-2.00");
    }
}
