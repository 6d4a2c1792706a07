use num_format::{Locale, ToFormattedString};

use crate::i18n::Language;

/// Token ratios are stored against a base unit half the size of the one we
/// quote per million tokens.
pub const TOKEN_DISPLAY_SCALAR: f64 = 2.0;

/// Quota units per dollar, the platform default.
pub const QUOTA_PER_UNIT: f64 = 500_000.0;

const TEN_THOUSAND: u64 = 10_000;

/// Enough fractional digits to print any f64 exactly, subnormals included.
const EXACT_FRACTION_DIGITS: usize = 1100;

/// Per-call price: round to 6 decimals, then drop the trailing zeros.
/// Missing or zero prints as "0".
pub fn format_price(price: Option<f64>) -> String {
    let Some(price) = price else {
        return "0".to_owned();
    };

    if price == 0.0 {
        return "0".to_owned();
    }

    let rounded = to_fixed(price, 6);

    if !rounded.contains('.') {
        // NaN and infinities come through untouched.
        return rounded;
    }

    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');

    match trimmed {
        "-0" => "0".to_owned(),
        other => other.to_owned(),
    }
}

/// Token ratio, quoted per million tokens.
/// More than 5 fractional digits get rounded to 5, anything shorter is shown as is.
pub fn format_token_ratio(ratio: f64) -> String {
    let value = ratio * TOKEN_DISPLAY_SCALAR;

    // Display for f64 is the shortest round-trip form, and never uses an exponent.
    let shortest = value.to_string();

    let fractional_digits = shortest
        .split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0);

    if fractional_digits > 5 {
        to_fixed(value, 5)
    } else {
        shortest
    }
}

/// Fixed-point rounding with ties going away from zero.
///
/// `format!("{:.N}")` breaks exact ties to even (1/128 -> "0.007812"), prices
/// are quoted with the tie rounded up ("0.007813"). The exact decimal
/// expansion is rounded by hand so that only true ties round up.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (integer, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().take(digits))
        .collect();

    // Anything from .5 upward in the dropped part rounds the kept digits up.
    let round_up = fraction.as_bytes().get(digits).is_some_and(|&d| d >= b'5');

    if round_up {
        let mut carry = true;

        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }

        if carry {
            kept.insert(0, b'1');
        }
    }

    let split_at = kept.len() - digits;
    let (integer, fraction) = kept.split_at(split_at);
    let integer = String::from_utf8_lossy(integer);
    let sign = if value.is_sign_negative() { "-" } else { "" };

    if digits == 0 {
        format!("{sign}{integer}")
    } else {
        format!("{sign}{integer}.{}", String::from_utf8_lossy(fraction))
    }
}

/// 1234567 -> "1,234,567".
pub fn group_thousands(count: u64, language: Language) -> String {
    let locale = match language {
        Language::Zh => Locale::zh,
        Language::En => Locale::en,
    };

    count.to_formatted_string(&locale)
}

/// Short form for chart labels.
/// Chinese readers get the ten-thousand unit: 123456 -> "12万+", 120000 -> "12万".
pub fn compact_count(count: u64, language: Language) -> String {
    match language {
        Language::Zh if count >= TEN_THOUSAND => {
            let suffix = if count % TEN_THOUSAND > 0 { "+" } else { "" };

            format!("{}万{}", count / TEN_THOUSAND, suffix)
        }
        _ => group_thousands(count, language),
    }
}

/// Remaining quota as dollars.
pub fn format_quota(quota: i64) -> String {
    format!("${:.2}", quota as f64 / QUOTA_PER_UNIT)
}
