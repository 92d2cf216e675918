//! Presentation formatting for dates and amounts
//!
//! Output follows US English conventions. None of these functions fail:
//! unreadable dates render as `Invalid date`.

use bitsweb_utils::group_thousands;
use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::date_range::DATE_FORMAT;

/// Rendered in place of an unreadable date
pub const INVALID_DATE: &str = "Invalid date";

/// Accepts `YYYY-MM-DD`, also when followed by a time part
fn parse_loose(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| value.get(..10).and_then(|head| NaiveDate::parse_from_str(head, DATE_FORMAT).ok()))
}

/// Short date, e.g. `2024-01-05` -> `1/5/2024`
pub fn format_date(value: &str) -> String {
    match parse_loose(value) {
        Some(date) => date.format("%-m/%-d/%Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Abbreviated month and year, e.g. `2024-01-05` -> `Jan 2024`
pub fn format_month(value: &str) -> String {
    match parse_loose(value) {
        Some(date) => date.format("%b %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Round half away from zero and render with exactly `decimals` places
fn fixed(value: f64, decimals: u32) -> String {
    match Decimal::from_f64(value) {
        Some(d) => {
            let rounded = d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", decimals as usize, rounded)
        }
        None => format!("{:.*}", decimals as usize, value),
    }
}

/// Group the integer part of an unsigned fixed-point string
fn grouped(unsigned: &str) -> String {
    match unsigned.split_once('.') {
        Some((int, frac)) => format!("{}.{}", group_thousands(int), frac),
        None => group_thousands(unsigned),
    }
}

/// US dollar amount, e.g. `1234.5` -> `$1,234.50`, `-3` -> `-$3.00`
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_string();
    }
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    if amount.is_infinite() {
        return format!("{}$∞", sign);
    }
    format!("{}${}", sign, grouped(&fixed(amount.abs(), 2)))
}

/// Plain number with digit grouping, e.g. `(31.456, 1)` -> `31.5`
pub fn format_number(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}", sign, grouped(&fixed(value.abs(), decimals)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(5.0), "$5.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(0.125), "$0.13");
    }

    #[test]
    fn test_format_currency_negative_and_special() {
        assert_eq!(format_currency(-1234.5), "-$1,234.50");
        assert_eq!(format_currency(-0.001), "-$0.00");
        assert_eq!(format_currency(-0.0), "-$0.00");
        assert_eq!(format_currency(f64::NAN), "$NaN");
        assert_eq!(format_currency(f64::INFINITY), "$∞");
        assert_eq!(format_currency(f64::NEG_INFINITY), "-$∞");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-05"), "1/5/2024");
        assert_eq!(format_date("2023-12-25"), "12/25/2023");
        assert_eq!(format_date("2024-01-05T10:30:00"), "1/5/2024");
        assert_eq!(format_date("2024-02-30"), INVALID_DATE);
        assert_eq!(format_date("yesterday"), INVALID_DATE);
        assert_eq!(format_date(""), INVALID_DATE);
    }

    #[test]
    fn test_format_month() {
        assert_eq!(format_month("2024-01-05"), "Jan 2024");
        assert_eq!(format_month("2023-09-30"), "Sep 2023");
        assert_eq!(format_month("garbage"), INVALID_DATE);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(31.456, 1), "31.5");
        assert_eq!(format_number(12345.0, 0), "12,345");
        assert_eq!(format_number(-0.25, 2), "-0.25");
    }
}
