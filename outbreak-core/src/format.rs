//! Display helpers for counts, percentages, and dates.
//!
//! Every helper accepts `Option` input and renders `None` as [`NOT_AVAILABLE`], so
//! presentation code can pass optional snapshot fields straight through.

use chrono::{DateTime, NaiveDate};

/// Placeholder rendered for missing values.
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder rendered for unparseable dates.
pub const INVALID_DATE: &str = "Invalid Date";

/// Numeric inputs accepted by the formatting helpers.
pub trait Count: Copy {
    /// Value as a float for scaling.
    fn as_f64(self) -> f64;
    /// Exact integer value, or `None` for non-integral inputs.
    fn as_integer(self) -> Option<i128>;
}

macro_rules! impl_count_int {
    ($($t:ty),*) => {$(
        impl Count for $t {
            #[allow(clippy::cast_precision_loss)]
            fn as_f64(self) -> f64 {
                self as f64
            }
            fn as_integer(self) -> Option<i128> {
                Some(i128::from(self))
            }
        }
    )*};
}

impl_count_int!(u32, u64, i32, i64);

impl Count for f64 {
    fn as_f64(self) -> f64 {
        self
    }

    #[allow(clippy::cast_possible_truncation)]
    fn as_integer(self) -> Option<i128> {
        if self.is_finite() && self.fract() == 0.0 && self.abs() < 1e30 {
            Some(self as i128)
        } else {
            None
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_integer(n: i128) -> String {
    let grouped = group_thousands(&n.unsigned_abs().to_string());
    if n < 0 { format!("-{grouped}") } else { grouped }
}

/// Render with thousands separators: `1234567` → `"1,234,567"`.
///
/// Fractional inputs keep at most three decimals, trailing zeros dropped.
#[must_use]
pub fn format_number<T: Count>(value: Option<T>) -> String {
    let Some(value) = value else {
        return NOT_AVAILABLE.to_string();
    };
    if let Some(n) = value.as_integer() {
        return format_integer(n);
    }
    let v = value.as_f64();
    if !v.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let fixed = format!("{:.3}", v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    let sign = if v < 0.0 { "-" } else { "" };
    let grouped = group_thousands(int_part);
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

/// Render with a magnitude suffix: `1500` → `"1.5K"`, `2_500_000` → `"2.5M"`.
///
/// Values below one thousand are rendered as-is.
#[must_use]
pub fn format_compact<T: Count>(value: Option<T>) -> String {
    let Some(value) = value else {
        return NOT_AVAILABLE.to_string();
    };
    let v = value.as_f64();
    if v >= 1_000_000_000.0 {
        format!("{:.1}B", v / 1_000_000_000.0)
    } else if v >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("{:.1}K", v / 1_000.0)
    } else if let Some(n) = value.as_integer() {
        n.to_string()
    } else {
        v.to_string()
    }
}

/// Render a ratio as a percentage: `0.8567` → `"85.67%"`.
#[must_use]
pub fn format_percentage(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}%", decimals, v * 100.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Short date label: `"Jan 15"`, or `"Jan 15, 2024"` with `include_year`.
#[must_use]
pub fn format_date(date: NaiveDate, include_year: bool) -> String {
    if include_year {
        date.format("%b %-d, %Y").to_string()
    } else {
        date.format("%b %-d").to_string()
    }
}

/// Parse a date string and render it like [`format_date`].
///
/// Accepts ISO-8601 calendar dates, RFC 3339 timestamps, and the provider's
/// `M/D/YY` timeline keys. Anything else renders as [`INVALID_DATE`].
#[must_use]
pub fn format_date_str(input: &str, include_year: bool) -> String {
    match parse_date(input) {
        Some(date) => format_date(date, include_year),
        None => INVALID_DATE.to_string(),
    }
}

/// Parse the date formats understood by [`format_date_str`].
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| NaiveDate::parse_from_str(s, "%m/%d/%y").ok())
}
