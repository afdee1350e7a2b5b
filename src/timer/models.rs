//! Study session and timer data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of a focus block in minutes
pub const FOCUS_MINUTES: u32 = 60;

/// Length of a break in minutes
pub const BREAK_MINUTES: u32 = 5;

/// A finished focus block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: Uuid,
    pub subject_id: Uuid,
    /// Duration in minutes
    pub duration: u32,
    pub date: DateTime<Utc>,
    pub completed: bool,
}

impl StudySession {
    /// A full focus block for `subject_id` that ended at `finished_at`
    pub fn completed(subject_id: Uuid, finished_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject_id,
            duration: FOCUS_MINUTES,
            date: finished_at,
            completed: true,
        }
    }

    pub fn hours(&self) -> f64 {
        self.duration as f64 / 60.0
    }
}

/// Which countdown the timer is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerPhase {
    #[default]
    Focus,
    Break,
}

/// Emitted by the timer when a countdown reaches zero
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    SessionCompleted(StudySession),
    BreakFinished,
}
