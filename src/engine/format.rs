//! Display formatting for the preview: INR currency with Indian digit grouping
//! and long-form US English dates.

use chrono::{Days, NaiveDate};

pub const CURRENCY_SYMBOL: &str = "\u{20b9}";
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y";

/// Parse a numeric form value, taking the longest numeric prefix.
///
/// `"20000"` -> 20000, `"12.5abc"` -> 12.5, `"  7"` -> 7.
/// Only input with no numeric prefix at all becomes 0. `"Infinity"` and
/// out-of-range exponents give infinities, and `"-0"` stays negative zero.
pub fn parse_amount(raw: &str) -> f64 {
    numeric_prefix(raw.trim_start())
        .and_then(|n| n.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Scan `[+-]?(Infinity|(digits[.digits]|.digits)([eE][+-]?digits)?)` from the
/// start of `s` and rebuild it in a form `f64::from_str` always accepts.
fn numeric_prefix(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut i = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    if s[i..].starts_with("Infinity") {
        return Some(if negative { "-inf" } else { "inf" }.to_string());
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = &s[int_start..i];

    let mut frac_digits = "";
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = &s[frac_start..j];
        i = j;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    let mut exponent = String::new();
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        let mut exp_sign = "";
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            if bytes[j] == b'-' {
                exp_sign = "-";
            }
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            exponent = format!("e{}{}", exp_sign, &s[exp_start..j]);
        }
    }

    Some(format!(
        "{}{}.{}{}",
        if negative { "-" } else { "" },
        if int_digits.is_empty() { "0" } else { int_digits },
        if frac_digits.is_empty() { "0" } else { frac_digits },
        exponent,
    ))
}

/// Format an amount as rupees with two decimals and Indian grouping,
/// e.g. `1234567.5` -> `₹12,34,567.50`. Any negative value keeps its sign,
/// including ones that round to zero.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return format!("{}NaN", CURRENCY_SYMBOL);
    }
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    if amount.is_infinite() {
        return format!("{}{}\u{221e}", sign, CURRENCY_SYMBOL);
    }

    let (int_part, frac_part) = round_to_paise(amount.abs());
    format!(
        "{}{}{}.{}",
        sign,
        CURRENCY_SYMBOL,
        group_indian(&int_part),
        frac_part
    )
}

/// Round a non-negative finite value to two decimals, working on its
/// shortest decimal form with halves rounded away from zero: `1.005` gives
/// `1.01`.
fn round_to_paise(value: f64) -> (String, String) {
    let repr = format!("{}", value);
    let (int_part, frac) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac.bytes().chain(std::iter::repeat(b'0')).take(2))
        .collect();

    if frac.as_bytes().get(2).is_some_and(|&d| d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - 2;
    let to_string = |d: &[u8]| d.iter().map(|&b| b as char).collect::<String>();
    (to_string(&digits[..split]), to_string(&digits[split..]))
}

/// Last three digits form one group, everything above groups in pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Render a `YYYY-MM-DD` value as `October 19, 2026`.
/// Empty input renders as empty; anything unparsable as `Invalid Date`.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    match parse_input_date(raw) {
        Some(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Month must be 1-12 and day 1-31. A day past the end of its month rolls
/// over into the next one, so `2025-02-30` is March 2, 2025.
fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.splitn(3, '-');
    let (y, m, d) = (parts.next()?, parts.next()?, parts.next()?);
    let numeric = |p: &str, min: usize, max: usize| {
        (min..=max).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_digit())
    };
    if !numeric(y, 4, 4) || !numeric(m, 1, 2) || !numeric(d, 1, 2) {
        return None;
    }

    let year: i32 = y.parse().ok()?;
    let month: u32 = m.parse().ok()?;
    let day: u32 = d.parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(day - 1)))
}

pub fn format_input_date(date: NaiveDate) -> String {
    date.format(INPUT_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(parse_amount("20000"), 20000.0);
        assert_eq!(parse_amount("8000"), 8000.0);
    }

    #[test]
    fn test_parse_decimal_and_signs() {
        assert_eq!(parse_amount("12.75"), 12.75);
        assert_eq!(parse_amount("-40.5"), -40.5);
        assert_eq!(parse_amount("+3"), 3.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("5."), 5.0);
    }

    #[test]
    fn test_parse_takes_numeric_prefix() {
        assert_eq!(parse_amount("12abc"), 12.0);
        assert_eq!(parse_amount("  7 rupees"), 7.0);
        assert_eq!(parse_amount("1,000"), 1.0);
        assert_eq!(parse_amount("3.2.1"), 3.2);
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(parse_amount("1e3"), 1000.0);
        assert_eq!(parse_amount("2.5E-1"), 0.25);
        // dangling exponent marker is not part of the number
        assert_eq!(parse_amount("4e"), 4.0);
        assert_eq!(parse_amount("4e+"), 4.0);
    }

    #[test]
    fn test_parse_unparsable_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("Inf"), 0.0);
    }

    #[test]
    fn test_parse_infinity_and_overflow() {
        assert_eq!(parse_amount("Infinity"), f64::INFINITY);
        assert_eq!(parse_amount("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(parse_amount("+Infinity days"), f64::INFINITY);
        assert_eq!(parse_amount("1e400"), f64::INFINITY);
        assert_eq!(format_currency(parse_amount("1e400")), "₹∞");
    }

    #[test]
    fn test_parse_keeps_negative_zero() {
        let v = parse_amount("-0");
        assert_eq!(v, 0.0);
        assert!(v.is_sign_negative());
    }

    #[test]
    fn test_currency_small_amounts() {
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(5.0), "₹5.00");
        assert_eq!(format_currency(999.999), "₹1,000.00");
    }

    #[test]
    fn test_currency_indian_grouping() {
        assert_eq!(format_currency(12000.0), "₹12,000.00");
        assert_eq!(format_currency(20000.0), "₹20,000.00");
        assert_eq!(format_currency(123456.0), "₹1,23,456.00");
        assert_eq!(format_currency(1234567.5), "₹12,34,567.50");
        assert_eq!(format_currency(123456789.0), "₹12,34,56,789.00");
    }

    #[test]
    fn test_currency_negative() {
        assert_eq!(format_currency(-2500.0), "-₹2,500.00");
        assert_eq!(format_currency(-0.001), "-₹0.00");
        assert_eq!(format_currency(-0.0), "-₹0.00");
    }

    #[test]
    fn test_currency_rounds_half_paise_up() {
        assert_eq!(format_currency(1.005), "₹1.01");
        assert_eq!(format_currency(0.125), "₹0.13");
        assert_eq!(format_currency(2.675), "₹2.68");
        assert_eq!(format_currency(1000.005), "₹1,000.01");
        assert_eq!(format_currency(8000.125), "₹8,000.13");
        assert_eq!(format_currency(-8000.125), "-₹8,000.13");
        assert_eq!(format_currency(0.124), "₹0.12");
        assert_eq!(format_currency(99999.995), "₹1,00,000.00");
    }

    #[test]
    fn test_currency_half_paise_from_typed_input() {
        let total = parse_amount("8000.125") - parse_amount("0");
        assert_eq!(format_currency(total), "₹8,000.13");
    }

    #[test]
    fn test_currency_non_finite() {
        assert_eq!(format_currency(f64::INFINITY), "₹∞");
        assert_eq!(format_currency(f64::NEG_INFINITY), "-₹∞");
    }

    #[test]
    fn test_date_long_form() {
        assert_eq!(format_date("2026-10-19"), "October 19, 2026");
        assert_eq!(format_date("2025-01-05"), "January 5, 2025");
    }

    #[test]
    fn test_date_empty_and_invalid() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("   "), "");
        assert_eq!(format_date("not a date"), "Invalid Date");
        assert_eq!(format_date("2025-02-32"), "Invalid Date");
        assert_eq!(format_date("2025-13-01"), "Invalid Date");
        assert_eq!(format_date("2025-00-10"), "Invalid Date");
        assert_eq!(format_date("2025-01-00"), "Invalid Date");
        assert_eq!(format_date("25-01-05"), "Invalid Date");
    }

    #[test]
    fn test_date_day_overflow_rolls_into_next_month() {
        assert_eq!(format_date("2025-02-30"), "March 2, 2025");
        assert_eq!(format_date("2024-02-30"), "March 1, 2024");
        assert_eq!(format_date("2025-04-31"), "May 1, 2025");
        assert_eq!(format_date("2025-12-31"), "December 31, 2025");
    }

    #[test]
    fn test_input_date_round_trip_format() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_input_date(d), "2026-03-07");
    }
}
