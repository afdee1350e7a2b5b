//! Fixed-interval spaced repetition
//!
//! Every logged error is reviewed 1, 7, 14 and 30 days after it was logged.
//! The agenda is recomputed from the entries and the current time on every
//! query; nothing here has side effects.

use chrono::{DateTime, Duration, Utc};

use super::models::{ReviewBuckets, ReviewInterval, ReviewItem, ReviewStatus};
use crate::notebook::ErrorEntry;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Review dates for an error logged at `logged_at`, in interval order
pub fn review_dates(logged_at: DateTime<Utc>) -> [DateTime<Utc>; 4] {
    ReviewInterval::ALL.map(|interval| logged_at + Duration::days(interval.days()))
}

/// Whole days elapsed since `review_date`, floored.
///
/// A review 3.5 days in the future is -4 days due, not -3.
pub fn days_due(review_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - review_date)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}

/// Build the review agenda: one item per (entry, review date), most overdue
/// first. Items with the same `days_due` keep their input order.
pub fn compute_agenda(entries: &[ErrorEntry], now: DateTime<Utc>) -> Vec<ReviewItem<'_>> {
    let mut items: Vec<ReviewItem<'_>> = entries
        .iter()
        .flat_map(|entry| {
            entry
                .review_dates
                .iter()
                .zip(ReviewInterval::ALL)
                .map(move |(&review_date, interval)| ReviewItem {
                    entry,
                    review_date,
                    interval,
                    days_due: days_due(review_date, now),
                })
        })
        .collect();

    items.sort_by(|a, b| b.days_due.cmp(&a.days_due));
    items
}

/// Split an agenda into overdue, due-today and upcoming (next 7 days).
/// Items further out than the upcoming window land in no bucket.
pub fn bucket<'a>(items: &[ReviewItem<'a>]) -> ReviewBuckets<'a> {
    let mut buckets = ReviewBuckets::default();

    for item in items {
        match item.status() {
            ReviewStatus::Overdue => buckets.overdue.push(*item),
            ReviewStatus::DueToday => buckets.due_today.push(*item),
            ReviewStatus::Upcoming => buckets.upcoming.push(*item),
            ReviewStatus::Later => {}
        }
    }

    buckets
}
