//! Property tests for time-expression resolution.

use chrono::{Datelike, Duration, NaiveDate};
use proptest::prelude::*;
use sales_query::resolve_date_range;

const PHRASES: &[&str] = &[
    "today",
    "yesterday",
    "last week",
    "this month",
    "current month",
    "last weekend",
    "this weekend",
    "past 3 days",
    "last month",
    "January",
    "june",
    "DECEMBER",
    "July 1st",
    "15th march",
    "2024-02-29",
    "banana",
];

const BACKWARD_PHRASES: &[&str] = &[
    "today",
    "yesterday",
    "last week",
    "this month",
    "last weekend",
    "past 3 days",
    "last month",
];

const WEEKEND_PHRASES: &[&str] = &["last weekend", "this weekend"];

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 plus up to ~60 years
    (0i64..22_000)
        .prop_map(|offset| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset))
}

fn any_phrase() -> impl Strategy<Value = &'static str> {
    prop::sample::select(PHRASES)
}

proptest! {
    #[test]
    fn resolution_is_deterministic(expr in any_phrase(), today in any_date()) {
        prop_assert_eq!(
            resolve_date_range(Some(expr), today),
            resolve_date_range(Some(expr), today)
        );
    }

    #[test]
    fn resolved_bounds_are_ordered_and_paired(expr in any_phrase(), today in any_date()) {
        let range = resolve_date_range(Some(expr), today);
        prop_assert_eq!(range.start().is_some(), range.end().is_some());
        if let Some((start, end)) = range.bounds() {
            prop_assert!(start <= end);
        }
    }

    #[test]
    fn backward_looking_phrases_end_by_today(
        expr in prop::sample::select(BACKWARD_PHRASES),
        today in any_date(),
    ) {
        let (_, end) = resolve_date_range(Some(expr), today).bounds().unwrap();
        prop_assert!(end <= today);
    }

    #[test]
    fn weekends_span_at_most_two_days(
        expr in prop::sample::select(WEEKEND_PHRASES),
        today in any_date(),
    ) {
        let (start, end) = resolve_date_range(Some(expr), today).bounds().unwrap();
        prop_assert!((end - start).num_days() <= 1);
    }

    #[test]
    fn month_names_never_extend_past_today(month in 0usize..12, today in any_date()) {
        let names = [
            "january", "february", "march", "april", "may", "june",
            "july", "august", "september", "october", "november", "december",
        ];
        let range = resolve_date_range(Some(names[month]), today);
        match range.bounds() {
            Some((start, end)) => {
                prop_assert_eq!(start.day(), 1);
                prop_assert_eq!(start.year(), today.year());
                prop_assert!(end <= today);
            }
            None => prop_assert!(month as u32 + 1 > today.month()),
        }
    }

    #[test]
    fn arbitrary_text_never_panics(expr in ".{0,40}", today in any_date()) {
        let range = resolve_date_range(Some(expr.as_str()), today);
        if let Some((start, end)) = range.bounds() {
            prop_assert!(start <= end);
        }
    }
}
