//! Points-scoring rule engine.
//!
//! [`evaluate`] is a pure function from a receipt to a point total plus a
//! human-readable breakdown of which rules fired. It performs no I/O and no
//! logging; malformed input surfaces as a typed [`Error`] and discards any
//! points accumulated before the failure.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::error::{Error, Result};
use crate::receipt::{Receipt, ScoreResult};

/// Count Unicode-alphanumeric characters in `text` and collect every
/// character that is neither alphanumeric nor a plain space. Spaces are
/// skipped silently: not counted, not flagged.
pub fn alphanumeric_scan(text: &str) -> (u32, Vec<char>) {
    let mut count: u32 = 0;
    let mut invalid = Vec::new();
    for c in text.chars() {
        if c.is_alphanumeric() {
            count += 1;
        } else if c != ' ' {
            invalid.push(c);
        }
    }
    (count, invalid)
}

/// Parse a non-negative decimal currency string into integer cents.
///
/// Accepts `D+`, `D+.D`, and `D+.DD`. Sign prefixes, empty parts, more than
/// two fraction digits, and values overflowing `u64` cents all return `None`.
pub fn parse_amount(text: &str) -> Option<u64> {
    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (text, None),
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let dollars: u64 = whole.parse().ok()?;
    let cents = match frac {
        None => 0,
        Some(f) => {
            if f.is_empty() || f.len() > 2 || !f.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let v: u64 = f.parse().ok()?;
            if f.len() == 1 {
                v * 10
            } else {
                v
            }
        }
    };
    dollars.checked_mul(100)?.checked_add(cents)
}

/// Whether an amount in integer cents divides evenly by `divisor` cents.
pub fn is_multiple_of_cents(cents: u64, divisor: u64) -> bool {
    divisor != 0 && cents % divisor == 0
}

/// Evaluate all seven scoring rules against a receipt.
///
/// Rules run in a fixed order; the breakdown records one group of lines per
/// rule that fired, in that order. Evaluation is all-or-nothing: the first
/// malformed field aborts with a typed error.
pub fn evaluate(receipt: &Receipt) -> Result<ScoreResult> {
    let total_cents = parse_amount(&receipt.total).ok_or_else(|| Error::InvalidAmount {
        field: "total".to_string(),
        value: receipt.total.clone(),
    })?;

    let mut points: u32 = 0;
    let mut breakdown: Vec<String> = Vec::new();

    // Rule 1: round dollar amount.
    let round_dollar = is_multiple_of_cents(total_cents, 100);
    if round_dollar {
        points += 50;
        breakdown.push("50 points - total is a round dollar amount".to_string());
    }

    // Rule 2: every round dollar is also a quarter multiple, skip the recheck.
    if round_dollar || is_multiple_of_cents(total_cents, 25) {
        points += 25;
        breakdown.push("25 points - total is a multiple of 0.25".to_string());
    }

    // Rule 3: one point per alphanumeric retailer character.
    let (name_points, invalid_chars) = alphanumeric_scan(&receipt.retailer);
    points = points.saturating_add(name_points);
    breakdown.push(format!(
        "{} points - retailer name ({}) has {} alphanumeric characters",
        name_points, receipt.retailer, name_points
    ));
    for c in &invalid_chars {
        breakdown.push(format!("note: '{}' is not alphanumeric", c));
    }

    // Rule 4: purchase between 2:00pm and 4:00pm.
    let time = NaiveTime::parse_from_str(&receipt.purchase_time, "%H:%M")
        .map_err(|_| Error::InvalidTimeFormat(receipt.purchase_time.clone()))?;
    if time.hour() > 13 && time.hour() < 16 {
        points += 10;
        breakdown.push(format!(
            "10 points - {} is between 2:00pm and 4:00pm",
            twelve_hour(time.hour(), time.minute())
        ));
    }

    // Rule 5: five points per pair of items.
    let pairs = (receipt.items.len() / 2) as u32;
    if pairs > 0 {
        points = points.saturating_add(pairs * 5);
        breakdown.push(format!(
            "{} points - {} items ({} pair(s) @ 5 points each)",
            pairs * 5,
            receipt.items.len(),
            pairs
        ));
    }

    // Rule 6: trimmed description length a positive multiple of three.
    // Every price is validated, qualifying or not.
    for (idx, item) in receipt.items.iter().enumerate() {
        let cents = parse_amount(&item.price).ok_or_else(|| Error::InvalidAmount {
            field: format!("items[{}].price", idx),
            value: item.price.clone(),
        })?;
        let description = item.short_description.trim();
        let len = description.chars().count();
        if len > 0 && len % 3 == 0 {
            // price * 0.2 is cents / 500 points exactly; round up.
            let item_points = u32::try_from(cents.div_ceil(500)).unwrap_or(u32::MAX);
            points = points.saturating_add(item_points);
            breakdown.push(format!(
                "{} points - \"{}\" is {} characters (a multiple of 3)",
                item_points, description, len
            ));
            breakdown.push(format!(
                "item price of {} * 0.2 = {} rounded up is {}",
                item.price,
                exact_fifth(cents),
                item_points
            ));
        }
    }

    // Rule 7: odd purchase day.
    let date = NaiveDate::parse_from_str(&receipt.purchase_date, "%Y-%m-%d")
        .map_err(|_| Error::InvalidDateFormat(receipt.purchase_date.clone()))?;
    if date.day() % 2 == 1 {
        points += 6;
        breakdown.push("6 points - purchase day is odd".to_string());
    }

    Ok(ScoreResult {
        total_points: points,
        breakdown,
    })
}

/// 12-hour clock rendering, e.g. `2:26 PM`.
fn twelve_hour(hour: u32, minute: u32) -> String {
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display, minute, meridiem)
}

/// `cents * 0.2` rendered exactly with trailing zeros trimmed
/// ("2.45", "2.4", "2").
fn exact_fifth(cents: u64) -> String {
    let thousandths = cents as u128 * 2;
    let whole = thousandths / 1000;
    let frac = (thousandths % 1000) as u32;
    if frac == 0 {
        whole.to_string()
    } else {
        let digits = format!("{:03}", frac);
        format!("{}.{}", whole, digits.trim_end_matches('0'))
    }
}
