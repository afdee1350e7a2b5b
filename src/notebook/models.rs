//! Data models for the error notebook

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reviews::{review_dates, ReviewInterval};

/// A logged mistake, reviewed on a fixed four-step schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEntry {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub topic: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// When the error was logged
    pub date: DateTime<Utc>,
    /// Review dates at +1, +7, +14 and +30 days from `date`
    pub review_dates: [DateTime<Utc>; 4],
}

impl ErrorEntry {
    pub fn new(
        subject_id: Uuid,
        topic: String,
        question: String,
        explanation: Option<String>,
        logged_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject_id,
            topic,
            question,
            explanation,
            date: logged_at,
            review_dates: review_dates(logged_at),
        }
    }

    pub fn review_date(&self, interval: ReviewInterval) -> DateTime<Utc> {
        self.review_dates[interval.index()]
    }
}

/// Request to log a new error
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewErrorEntry {
    pub subject_id: Uuid,
    pub topic: String,
    pub question: String,
    pub explanation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_json_round_trip_reparses_dates() {
        let logged = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let entry = ErrorEntry::new(
            Uuid::new_v4(),
            "Crase".to_string(),
            "When is crase mandatory?".to_string(),
            Some("Before feminine nouns with article".to_string()),
            logged,
        );

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2024-01-01T00:00:00Z");
        assert_eq!(json["reviewDates"][3], "2024-01-31T00:00:00Z");

        let restored: ErrorEntry = serde_json::from_value(json).unwrap();
        assert_eq!(restored, entry);
        assert_eq!(
            restored.review_date(ReviewInterval::SevenDays),
            logged + Duration::days(7)
        );
    }

    #[test]
    fn test_missing_explanation_is_omitted() {
        let entry = ErrorEntry::new(
            Uuid::new_v4(),
            "Topic".to_string(),
            "Question".to_string(),
            None,
            Utc::now(),
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("explanation").is_none());
    }
}
