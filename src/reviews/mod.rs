//! Spaced repetition review scheduling for logged errors
//!
//! This module provides:
//! - Fixed review intervals (1, 7, 14 and 30 days after an error is logged)
//! - The review agenda: every (entry, review date) pair with its due status
//! - Bucketing into overdue / due today / upcoming this week
//! - Completion tracking per review occurrence

pub mod algorithm;
pub mod completion;
pub mod models;

pub use algorithm::{bucket, compute_agenda, days_due, review_dates};
pub use completion::CompletionRecord;
pub use models::*;
