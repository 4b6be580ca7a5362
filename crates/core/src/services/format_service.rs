use chrono::{Datelike, NaiveDate};

use crate::models::dashboard::FormattedAmount;
use crate::models::preferences::{Currency, FALLBACK_RATE, Language};

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_RU: [&str; 12] = [
    "янв", "фев", "мар", "апр", "мая", "июн", "июл", "авг", "сен", "окт", "ноя", "дек",
];

/// Turns raw RUB-denominated magnitudes into display strings.
///
/// Pure — no locale lookup, no clock. Fraction-digit rules:
/// - RUB: minimum 0, maximum 2 fraction digits (trailing zeros trimmed)
/// - USD: exactly 2 fraction digits, value divided by the current rate
pub struct FormatService;

impl FormatService {
    pub fn new() -> Self {
        Self
    }

    /// Format a raw RUB magnitude in the active display currency.
    ///
    /// A non-finite or non-positive rate falls back to [`FALLBACK_RATE`]
    /// before any division, so the division can never be by zero. Negative
    /// inputs keep their minus sign (net balance can be negative).
    pub fn format_amount(&self, raw: f64, currency: Currency, rate: f64) -> FormattedAmount {
        let rate = if rate.is_finite() && rate > 0.0 {
            rate
        } else {
            FALLBACK_RATE
        };

        let (value, min_frac) = match currency {
            Currency::Rub => (raw, 0),
            Currency::Usd => (raw / rate, 2),
        };

        FormattedAmount {
            text: format_decimal(value, min_frac, 2),
            sign: currency.sign(),
        }
    }

    /// Short localized date label for history rows, e.g. "5 Mar" / "5 мар".
    pub fn format_short_date(&self, date: NaiveDate, lang: Language) -> String {
        let months = match lang {
            Language::Ru => &MONTHS_RU,
            Language::En => &MONTHS_EN,
        };
        let month = months[date.month0() as usize];
        format!("{} {month}", date.day())
    }
}

impl Default for FormatService {
    fn default() -> Self {
        Self::new()
    }
}

/// Round to `max_frac` digits, then trim trailing fractional zeros down to
/// `min_frac` digits. `-0` normalizes to `0`.
fn format_decimal(value: f64, min_frac: usize, max_frac: usize) -> String {
    let value = if value == 0.0 { 0.0 } else { value }; // collapse -0.0
    let mut text = format!("{value:.max_frac$}");

    if max_frac > min_frac {
        if let Some(dot) = text.find('.') {
            let keep_until = if min_frac == 0 {
                dot
            } else {
                dot + 1 + min_frac
            };
            let trimmed = text.trim_end_matches('0');
            let mut end = trimmed.len().max(keep_until);
            // Never leave a dangling decimal point
            if text.as_bytes().get(end.saturating_sub(1)) == Some(&b'.') {
                end -= 1;
            }
            text.truncate(end);
        }
    }
    text
}
