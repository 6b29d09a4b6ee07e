//! Result formatting.
//!
//! Two forms: plain (stored in history, re-inserted as Ans) and grouped
//! (display only, with thousand separators).

/// Decimal places used when no precision is configured.
pub const DEFAULT_PRECISION: usize = 10;

/// Largest magnitude printed without an exponent.
const FIXED_LIMIT: f64 = 1e15;

/// Magnitudes below this are floating-point residue (`0.1+0.2-0.3`) and
/// print as 0. Half a unit in the 14th decimal place.
const ROUNDOFF_FLOOR: f64 = 0.5e-14;

/// Format a number with at most `precision` decimals, trailing zeros trimmed.
///
/// Integral values print without a fraction. Residue below `5e-15` prints
/// as `0`. Very large magnitudes, and small ones the precision would round
/// away, switch to exponent notation (`1.5e20`, `2.5e-12`).
pub fn format_plain(value: f64, precision: usize) -> String {
    let abs = value.abs();
    if abs < ROUNDOFF_FLOOR {
        return "0".to_string();
    }

    if value.fract() == 0.0 && abs < FIXED_LIMIT {
        // `as` saturates and maps -0.0 to 0
        return format!("{}", value as i64);
    }

    let smallest_fixed = 10f64.powi(-(precision.min(300) as i32));
    if abs >= FIXED_LIMIT || (abs != 0.0 && abs < smallest_fixed) {
        return format_exponent(value, precision);
    }

    let fixed = format!("{:.*}", precision, value);
    let trimmed = trim_fraction(&fixed);
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format for display: [`format_plain`] with thousand separators in the
/// integer part. Exponent forms are left alone.
pub fn format_grouped(value: f64, precision: usize) -> String {
    let plain = format_plain(value, precision);
    if plain.contains('e') {
        return plain;
    }

    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    format!("{sign}{}{frac_part}", group_thousands(int_part))
}

fn format_exponent(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*e}", precision, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => format!("{}e{exponent}", trim_fraction(mantissa)),
        None => formatted,
    }
}

/// Drop trailing zeros after a decimal point, and the point itself if bare.
fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Insert `,` every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
