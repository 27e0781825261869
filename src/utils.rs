use once_cell::sync::Lazy;
use regex::Regex;

use crate::DataError;

// Separators the source data uses inside numbers: "1,160", "68 991"
static THOUSANDS_SEP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\s]").unwrap());
static GROUPED_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}([,\s]\d{3})*(\.\d+)?$|^\d+(\.\d+)?$").unwrap());

/// Strip thousands separators from a numeric field.
///
/// Only well-formed groupings are accepted, so "1,16" is rejected instead of
/// silently turning into 116.
pub fn strip_thousands(input: &str, field: &'static str) -> Result<String, DataError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !GROUPED_NUMBER_REGEX.is_match(trimmed) {
        return Err(DataError::InvalidNumber {
            field,
            value: input.to_string(),
        });
    }
    Ok(THOUSANDS_SEP_REGEX.replace_all(trimmed, "").into_owned())
}

/// Parse a non-negative integer that may carry thousands separators.
///
/// # Examples
/// ```
/// use worldcup_vis::utils::parse_grouped_u32;
/// assert_eq!(parse_grouped_u32("1,160", "GOALS").unwrap(), 1160);
/// assert_eq!(parse_grouped_u32("68991", "GOALS").unwrap(), 68_991);
/// ```
pub fn parse_grouped_u32(input: &str, field: &'static str) -> Result<u32, DataError> {
    let digits = strip_thousands(input, field)?;
    digits.parse::<u32>().map_err(|_| DataError::InvalidNumber {
        field,
        value: input.to_string(),
    })
}

/// Parse a non-negative real that may carry thousands separators.
pub fn parse_grouped_f64(input: &str, field: &'static str) -> Result<f64, DataError> {
    let digits = strip_thousands(input, field)?;
    digits.parse::<f64>().map_err(|_| DataError::InvalidNumber {
        field,
        value: input.to_string(),
    })
}

/// Group an integer's digits in threes: 68991 -> "68,991".
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format an axis value: grouped integers when whole, otherwise up to two
/// decimals with trailing zeros dropped.
pub fn format_axis_value(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        return format_thousands(value.round().max(0.0) as u64);
    }
    let fixed = format!("{:.2}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}
