//! Numeric text conversion for cards
//!
//! The solver's reader expects floating point values in one fixed convention:
//! the shortest digit string that round-trips, fixed notation with at least one
//! fractional digit for decimal exponents in `-4..16`, otherwise scientific
//! notation with a signed exponent of at least two digits. The conversion is
//! independent of locale.

/// Formats a double for a card
///
/// # Examples
///
/// ```
/// use cardex::core::resolve::numeric::format_double;
///
/// assert_eq!(format_double(0.3), "0.3");
/// assert_eq!(format_double(10.0), "10.0");
/// assert_eq!(format_double(1e-5), "1e-05");
/// assert_eq!(format_double(2.5e16), "2.5e+16");
/// ```
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value == 0.0 {
        return format!("{sign}0.0");
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "1.2345e3"
    let sci = format!("{:e}", value.abs());
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if !(-4..16).contains(&exponent) {
        let (lead, rest) = digits.split_at(1);
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        let mut out = format!("{sign}{lead}");
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        out.push_str(&format!("e{exp_sign}{:02}", exponent.abs()));
        return out;
    }

    if exponent >= 0 {
        let int_len = exponent as usize + 1;
        if digits.len() <= int_len {
            let zeros = "0".repeat(int_len - digits.len());
            format!("{sign}{digits}{zeros}.0")
        } else {
            let (int_part, frac_part) = digits.split_at(int_len);
            format!("{sign}{int_part}.{frac_part}")
        }
    } else {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("{sign}0.{zeros}{digits}")
    }
}

/// Formats an integer for a card
pub fn format_int(value: i64) -> String {
    value.to_string()
}
