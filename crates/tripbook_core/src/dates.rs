//! Calendar ranges and day-list normalization.
//!
//! # Responsibility
//! - Expand a `YYYY-MM-DD` start/end pair into its inclusive day sequence.
//! - Resynchronize a trip's day list with its date range.
//!
//! # Invariants
//! - Dates advance by plain calendar increment; no timezone arithmetic.
//! - `end < start` and unparseable dates both yield an empty range.
//! - Normalization keeps items of retained dates and drops everything else.

use crate::model::trip::{DayPlan, Trip};
use chrono::NaiveDate;
use std::collections::HashMap;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Returns every date from `start` to `end`, inclusive and ascending.
pub fn date_range(start: &str, end: &str) -> Vec<String> {
    let (Some(start), Some(end)) = (parse_date(start), parse_date(end)) else {
        return Vec::new();
    };

    let mut days = Vec::new();
    let mut current = Some(start);
    while let Some(date) = current.filter(|date| *date <= end) {
        days.push(format_date(date));
        current = date.succ_opt();
    }
    days
}

/// Rebuilds `trip.days` so it matches `start_date..=end_date` exactly.
///
/// Existing days are reused by exact date match, new dates get an empty
/// day, and days outside the range are discarded along with their items.
pub fn ensure_days(mut trip: Trip) -> Trip {
    let days = std::mem::take(&mut trip.days);
    trip.days = normalize_days(days, &trip.start_date, &trip.end_date);
    trip
}

/// Day-list half of [`ensure_days`].
///
/// When `days` holds the same date twice, the later entry wins.
pub fn normalize_days(days: Vec<DayPlan>, start: &str, end: &str) -> Vec<DayPlan> {
    let mut by_date: HashMap<String, DayPlan> = days
        .into_iter()
        .map(|day| (day.date.clone(), day))
        .collect();

    date_range(start, end)
        .into_iter()
        .map(|date| by_date.remove(&date).unwrap_or_else(|| DayPlan::empty(date)))
        .collect()
}
