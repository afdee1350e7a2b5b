//! Completed review occurrences

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::ReviewKey;

/// Set of review occurrences the user has marked as done.
///
/// Keyed by (entry id, review date) so it survives agenda recomputation and
/// is persisted independently of the error log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionRecord {
    keys: BTreeSet<ReviewKey>,
}

impl CompletionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a review as done. Returns `false` if it already was.
    pub fn mark_complete(&mut self, entry_id: Uuid, review_date: DateTime<Utc>) -> bool {
        self.keys.insert(ReviewKey::new(entry_id, review_date))
    }

    pub fn is_complete(&self, entry_id: Uuid, review_date: DateTime<Utc>) -> bool {
        self.contains(&ReviewKey::new(entry_id, review_date))
    }

    pub fn contains(&self, key: &ReviewKey) -> bool {
        self.keys.contains(key)
    }

    /// Remove every completion belonging to an entry. Returns how many were removed.
    pub fn forget_entry(&mut self, entry_id: Uuid) -> usize {
        let before = self.keys.len();
        self.keys.retain(|key| key.entry_id != entry_id);
        before - self.keys.len()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn review_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_mark_then_lookup() {
        let mut record = CompletionRecord::new();
        let entry_id = Uuid::new_v4();

        assert!(!record.is_complete(entry_id, review_date()));
        assert!(record.mark_complete(entry_id, review_date()));
        assert!(record.is_complete(entry_id, review_date()));

        assert!(!record.is_complete(Uuid::new_v4(), review_date()));
        assert!(!record.is_complete(entry_id, review_date() + Duration::days(6)));
    }

    #[test]
    fn test_mark_complete_is_idempotent() {
        let mut record = CompletionRecord::new();
        let entry_id = Uuid::new_v4();

        assert!(record.mark_complete(entry_id, review_date()));
        assert!(!record.mark_complete(entry_id, review_date()));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_forget_entry() {
        let mut record = CompletionRecord::new();
        let kept = Uuid::new_v4();
        let removed = Uuid::new_v4();

        record.mark_complete(kept, review_date());
        record.mark_complete(removed, review_date());
        record.mark_complete(removed, review_date() + Duration::days(6));

        assert_eq!(record.forget_entry(removed), 2);
        assert_eq!(record.len(), 1);
        assert!(record.is_complete(kept, review_date()));
    }

    #[test]
    fn test_serializes_as_key_list() {
        let mut record = CompletionRecord::new();
        let entry_id = Uuid::new_v4();
        record.mark_complete(entry_id, review_date());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "entryId": entry_id.to_string(),
                "reviewDate": review_date().timestamp_millis(),
            }])
        );

        let restored: CompletionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(restored, record);
    }
}
