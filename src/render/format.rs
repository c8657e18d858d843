//! Text formatting for amounts, percentages and dates.

use chrono::{DateTime, Utc};

/// Whole-dollar amount with thousands separators, e.g. `$12,500`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}")
}

/// One decimal place, as shown for conversion rates.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Close date as `Mar 31, 2024`.
pub fn format_close_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}
