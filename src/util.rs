// Utility helpers for parsing and display formatting.
//
// Loading goes through the `parse_*` helpers so the rest of the code can
// assume clean, typed values; rendering goes through the `format_*` helpers
// so no other module decides on currency symbols or separators.
use num_format::{Locale, ToFormattedString};
use rust_decimal::Decimal;
use std::str::FromStr;

pub const CURRENCY_SIGN: &str = "₦";

/// Largest amount a single row may carry. Keeps every sum far below
/// `Decimal::MAX` so aggregation cannot overflow. 10^15.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Trim a text cell, treating empty cells as missing.
pub fn parse_text_safe(s: Option<&str>) -> Option<String> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    Some(s.to_string())
}

/// Parse a currency cell into an exact `Decimal`.
///
/// - Trims whitespace and a leading `₦`.
/// - Strips thousands separators like `","` before parsing.
/// - Rejects values containing alphabetic characters.
/// - Rejects negative amounts and amounts above `MAX_AMOUNT`.
/// - Stores `-0` as plain zero.
pub fn parse_amount_safe(s: Option<&str>) -> Option<Decimal> {
    let s = s?.trim();
    let s = s.strip_prefix(CURRENCY_SIGN).unwrap_or(s).trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    let value = Decimal::from_str(&s).ok()?;
    if value.is_zero() {
        return Some(Decimal::ZERO);
    }
    if value.is_sign_negative() || value > MAX_AMOUNT {
        return None;
    }
    Some(value)
}

/// Format an amount with two decimal places and `en` thousands separators,
/// e.g. `1,234,567.89`.
pub fn format_number(n: Decimal, decimals: u32) -> String {
    let neg = n.is_sign_negative() && !n.is_zero();
    let s = format!("{:.*}", decimals as usize, n.abs().round_dp(decimals));
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i128 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_currency(n: Decimal) -> String {
    format!("{}{}", CURRENCY_SIGN, format_number(n, 2))
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

/// Percentage of `part` in `whole` with one decimal, `0.0%` when `whole` is zero.
pub fn format_share(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / whole as f64)
}
