//! Deterministic resolution of natural-language time expressions.
//!
//! Turns a phrase such as `"last weekend"`, `"July 1st"`, `"past 3 days"`, a
//! bare ISO date, or a bare month name into an inclusive [`DateRange`] of
//! calendar days. The caller provides the `today` anchor; nothing here reads
//! the system clock.
//!
//! Unrecognized input is not an error. It resolves to an empty range, which
//! callers treat as "no date filter".
//!
//! # Resolution order
//!
//! 1. Absent or empty expression
//! 2. Month name and day anywhere in the text (`"July 1st"`, `"1st August"`)
//! 3. Relative phrases (`"today"`, `"last week"`, `"this weekend"`, ...)
//! 4. ISO 8601 date (`"2025-07-21"`)
//! 5. Full month name (`"July"`)
//!
//! The first step that produces a range wins.

use std::sync::LazyLock;

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;

use crate::model::DateRange;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(january|february|march|april|may|june|july|august|september|october|november|december)\s+([0-9]{1,2})(?:st|nd|rd|th)?",
    )
    .expect("valid month-day pattern")
});

static DAY_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)([0-9]{1,2})(?:st|nd|rd|th)?\s+(january|february|march|april|may|june|july|august|september|october|november|december)",
    )
    .expect("valid day-month pattern")
});

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid ISO date pattern"));

// ── resolve_date_range ──────────────────────────────────────────────────────

/// Resolve a time expression to an inclusive date range relative to `today`.
///
/// # Supported Expressions
///
/// **Specific day**: `"July 1st"`, `"1st August"`, `"march 3"` (current year)
///
/// **Anchored**: `"today"`, `"yesterday"`
///
/// **Windows**: `"last week"` (7 days ending yesterday), `"past 3 days"` (ending today)
///
/// **Months**: `"this month"`, `"current month"` (month to date), `"last month"`,
/// or a full month name such as `"July"`
///
/// **Weekends**: `"last weekend"`, `"this weekend"`
///
/// **Passthrough**: an ISO 8601 date (`"2025-07-21"`)
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sales_query::temporal::resolve_date_range;
///
/// let today = NaiveDate::from_ymd_opt(2025, 7, 21).unwrap();
/// let range = resolve_date_range(Some("last week"), today);
/// assert_eq!(range.start(), NaiveDate::from_ymd_opt(2025, 7, 14));
/// assert_eq!(range.end(), NaiveDate::from_ymd_opt(2025, 7, 20));
///
/// assert!(!resolve_date_range(Some("banana"), today).is_resolved());
/// ```
pub fn resolve_date_range(expression: Option<&str>, today: NaiveDate) -> DateRange {
    let Some(expression) = expression.filter(|s| !s.is_empty()) else {
        return DateRange::unresolved();
    };
    let lower = expression.to_lowercase();

    try_month_day(expression, today)
        .or_else(|| try_relative(&lower, today))
        .or_else(|| try_iso_date(expression))
        .or_else(|| try_month_name(&lower, today))
        .unwrap_or_else(DateRange::unresolved)
}

// ── Expression parsers ──────────────────────────────────────────────────────

/// "Month Day" or "Day Month" anywhere in the text, in `today`'s year.
///
/// Dates that do not exist (e.g. "June 31st") fall through to the next parser.
fn try_month_day(s: &str, today: NaiveDate) -> Option<DateRange> {
    let (month, day) = if let Some(caps) = MONTH_DAY.captures(s) {
        (caps.get(1)?.as_str(), caps.get(2)?.as_str())
    } else {
        let caps = DAY_MONTH.captures(s)?;
        (caps.get(2)?.as_str(), caps.get(1)?.as_str())
    };

    let month = parse_month(&month.to_lowercase())?;
    let day: u32 = day.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    Some(DateRange::single(date))
}

/// Fixed relative phrases, matched exactly. `s` must already be lower-cased.
///
/// Arithmetic that would leave chrono's representable range resolves to nothing.
fn try_relative(s: &str, today: NaiveDate) -> Option<DateRange> {
    let weekday = u64::from(today.weekday().num_days_from_sunday());

    match s {
        "today" => Some(DateRange::single(today)),
        "yesterday" => Some(DateRange::single(today.pred_opt()?)),
        "last week" => {
            let end = today.pred_opt()?;
            Some(DateRange::between(end.checked_sub_days(Days::new(6))?, end))
        }
        "this month" | "current month" => Some(DateRange::between(first_of_month(today)?, today)),
        "last weekend" => {
            let end = match weekday {
                // Sunday and Monday: the two days before today
                0 | 1 => today.pred_opt()?,
                _ => today.checked_sub_days(Days::new(weekday + 1))?,
            };
            Some(DateRange::between(end.pred_opt()?, end))
        }
        "this weekend" => match weekday {
            6 => Some(DateRange::between(today, today.succ_opt()?)),
            0 => Some(DateRange::single(today)),
            _ => {
                let saturday = today.checked_add_days(Days::new(6 - weekday))?;
                Some(DateRange::between(saturday, saturday.succ_opt()?))
            }
        },
        "past 3 days" => Some(DateRange::between(
            today.checked_sub_days(Days::new(2))?,
            today,
        )),
        "last month" => {
            let last_day = first_of_month(today)?.pred_opt()?;
            Some(DateRange::between(first_of_month(last_day)?, last_day))
        }
        _ => None,
    }
}

/// An ISO 8601 calendar date (`YYYY-MM-DD`) that actually exists.
fn try_iso_date(s: &str) -> Option<DateRange> {
    if !ISO_DATE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(DateRange::single)
}

/// A full month name in `today`'s year, clipped to `today` for the current month.
///
/// Months that have not started yet resolve to nothing.
fn try_month_name(s: &str, today: NaiveDate) -> Option<DateRange> {
    let month = parse_month(s)?;
    let first = NaiveDate::from_ymd_opt(today.year(), month, 1)?;
    if first > today {
        return None;
    }
    let last = last_of_month(first)?;
    Some(DateRange::between(first, last.min(today)))
}

// ── Calendar helpers ────────────────────────────────────────────────────────

/// Parse a full month name to its number (1-12).
fn parse_month(s: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|name| *name == s)
        .map(|i| i as u32 + 1)
}

fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
}

fn last_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

// ── Tests ───────────────────────────────────────────────────────────────────
