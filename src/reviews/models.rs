//! Data models for the review schedule

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::notebook::ErrorEntry;

/// One of the four fixed review intervals, in schedule order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReviewInterval {
    #[serde(rename = "1 day")]
    OneDay,
    #[serde(rename = "7 days")]
    SevenDays,
    #[serde(rename = "14 days")]
    FourteenDays,
    #[serde(rename = "30 days")]
    ThirtyDays,
}

impl ReviewInterval {
    /// All intervals, indexed the same way as `ErrorEntry::review_dates`
    pub const ALL: [ReviewInterval; 4] = [
        ReviewInterval::OneDay,
        ReviewInterval::SevenDays,
        ReviewInterval::FourteenDays,
        ReviewInterval::ThirtyDays,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            ReviewInterval::OneDay => 0,
            ReviewInterval::SevenDays => 1,
            ReviewInterval::FourteenDays => 2,
            ReviewInterval::ThirtyDays => 3,
        }
    }

    /// Offset from the day the error was logged
    pub fn days(self) -> i64 {
        match self {
            ReviewInterval::OneDay => 1,
            ReviewInterval::SevenDays => 7,
            ReviewInterval::FourteenDays => 14,
            ReviewInterval::ThirtyDays => 30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReviewInterval::OneDay => "1 day",
            ReviewInterval::SevenDays => "7 days",
            ReviewInterval::FourteenDays => "14 days",
            ReviewInterval::ThirtyDays => "30 days",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            ReviewInterval::OneDay => "1d",
            ReviewInterval::SevenDays => "1w",
            ReviewInterval::FourteenDays => "2w",
            ReviewInterval::ThirtyDays => "1mo",
        }
    }
}

impl fmt::Display for ReviewInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable identity of one review occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewKey {
    pub entry_id: Uuid,
    /// Scheduled review date in epoch milliseconds
    pub review_date: i64,
}

impl ReviewKey {
    pub fn new(entry_id: Uuid, review_date: DateTime<Utc>) -> Self {
        Self {
            entry_id,
            review_date: review_date.timestamp_millis(),
        }
    }
}

/// Due status of a review relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewStatus {
    Overdue,
    DueToday,
    /// Due within the next seven days
    Upcoming,
    /// More than seven days away; not part of any bucket
    Later,
}

/// Number of future days covered by the upcoming bucket
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

impl ReviewStatus {
    pub fn from_days_due(days_due: i64) -> Self {
        if days_due > 0 {
            ReviewStatus::Overdue
        } else if days_due == 0 {
            ReviewStatus::DueToday
        } else if days_due >= -UPCOMING_WINDOW_DAYS {
            ReviewStatus::Upcoming
        } else {
            ReviewStatus::Later
        }
    }
}

/// One scheduled review of an error entry. Derived, never stored.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem<'a> {
    pub entry: &'a ErrorEntry,
    pub review_date: DateTime<Utc>,
    pub interval: ReviewInterval,
    /// Whole days since the review date: positive when overdue, zero when
    /// due today, negative in the future
    pub days_due: i64,
}

impl ReviewItem<'_> {
    pub fn key(&self) -> ReviewKey {
        ReviewKey::new(self.entry.id, self.review_date)
    }

    pub fn status(&self) -> ReviewStatus {
        ReviewStatus::from_days_due(self.days_due)
    }
}

/// Review items grouped by due status
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBuckets<'a> {
    pub overdue: Vec<ReviewItem<'a>>,
    pub due_today: Vec<ReviewItem<'a>>,
    pub upcoming: Vec<ReviewItem<'a>>,
}

/// Counts shown on the review screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub overdue: usize,
    pub due_today: usize,
    pub upcoming: usize,
    pub completed: usize,
}

impl ReviewStats {
    pub fn new(buckets: &ReviewBuckets<'_>, completed: usize) -> Self {
        Self {
            overdue: buckets.overdue.len(),
            due_today: buckets.due_today.len(),
            upcoming: buckets.upcoming.len(),
            completed,
        }
    }
}
