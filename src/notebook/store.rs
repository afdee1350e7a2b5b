//! In-memory error log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::models::{ErrorEntry, NewErrorEntry};
use crate::subjects::Subject;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorLogError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Error entry not found: {0}")]
    NotFound(Uuid),
}

pub type Result<T> = std::result::Result<T, ErrorLogError>;

/// Logged errors in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorLogStore {
    entries: Vec<ErrorEntry>,
}

fn non_blank(value: String, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ErrorLogError::MissingRequiredField(field));
    }
    Ok(trimmed.to_string())
}

impl ErrorLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[ErrorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&ErrorEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Log an error; its review dates are fixed from `logged_at`
    pub fn add(&mut self, request: NewErrorEntry, logged_at: DateTime<Utc>) -> Result<ErrorEntry> {
        let topic = non_blank(request.topic, "topic")?;
        let question = non_blank(request.question, "question")?;
        let explanation = request
            .explanation
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        let entry = ErrorEntry::new(request.subject_id, topic, question, explanation, logged_at);
        self.entries.push(entry.clone());
        log::info!("Logged error '{}' ({})", entry.topic, entry.id);

        Ok(entry)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<ErrorEntry> {
        let pos = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(ErrorLogError::NotFound(id))?;
        Ok(self.entries.remove(pos))
    }

    pub fn for_subject(&self, subject_id: Uuid) -> impl Iterator<Item = &ErrorEntry> {
        self.entries.iter().filter(move |e| e.subject_id == subject_id)
    }

    /// Case-insensitive substring search over topic, question and subject name.
    /// An empty term matches every entry.
    pub fn search(&self, term: &str, subjects: &[Subject]) -> Vec<&ErrorEntry> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.entries.iter().collect();
        }

        self.entries
            .iter()
            .filter(|entry| {
                let subject_name = subjects
                    .iter()
                    .find(|s| s.id == entry.subject_id)
                    .map(|s| s.name.to_lowercase());

                entry.topic.to_lowercase().contains(&term)
                    || entry.question.to_lowercase().contains(&term)
                    || subject_name.map_or(false, |name| name.contains(&term))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reviews::review_dates;
    use crate::subjects::{SubjectCategory, SubjectColor};

    fn request(subject_id: Uuid, topic: &str, question: &str) -> NewErrorEntry {
        NewErrorEntry {
            subject_id,
            topic: topic.to_string(),
            question: question.to_string(),
            explanation: None,
        }
    }

    #[test]
    fn test_add_computes_review_dates() {
        let mut log = ErrorLogStore::new();
        let now = Utc::now();

        let entry = log
            .add(request(Uuid::new_v4(), "Verbs", "Subjunctive?"), now)
            .unwrap();

        assert_eq!(entry.date, now);
        assert_eq!(entry.review_dates, review_dates(now));
        assert_eq!(log.get(entry.id), Some(&entry));
    }

    #[test]
    fn test_add_requires_topic_and_question() {
        let mut log = ErrorLogStore::new();
        let subject_id = Uuid::new_v4();

        assert_eq!(
            log.add(request(subject_id, "  ", "Q"), Utc::now()),
            Err(ErrorLogError::MissingRequiredField("topic"))
        );
        assert_eq!(
            log.add(request(subject_id, "T", ""), Utc::now()),
            Err(ErrorLogError::MissingRequiredField("question"))
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_blank_explanation_stored_as_none() {
        let mut log = ErrorLogStore::new();
        let mut req = request(Uuid::new_v4(), "T", "Q");
        req.explanation = Some("   ".to_string());

        let entry = log.add(req, Utc::now()).unwrap();
        assert_eq!(entry.explanation, None);
    }

    #[test]
    fn test_remove() {
        let mut log = ErrorLogStore::new();
        let entry = log.add(request(Uuid::new_v4(), "T", "Q"), Utc::now()).unwrap();

        assert_eq!(log.remove(entry.id).unwrap().id, entry.id);
        assert_eq!(log.remove(entry.id), Err(ErrorLogError::NotFound(entry.id)));
    }

    #[test]
    fn test_search_matches_topic_question_and_subject() {
        let law = Subject::new(
            "Constitutional Law".to_string(),
            SubjectCategory::Theoretical,
            SubjectColor::Blue,
        );
        let math = Subject::new(
            "Math".to_string(),
            SubjectCategory::Practical,
            SubjectColor::Green,
        );
        let subjects = vec![law.clone(), math.clone()];

        let mut log = ErrorLogStore::new();
        let now = Utc::now();
        log.add(request(law.id, "Habeas corpus", "Who can file?"), now).unwrap();
        log.add(request(math.id, "Fractions", "Simplify 6/8"), now).unwrap();
        log.add(request(Uuid::new_v4(), "Orphan", "No subject"), now).unwrap();

        let topics = |term: &str| -> Vec<String> {
            log.search(term, &subjects)
                .into_iter()
                .map(|e| e.topic.clone())
                .collect()
        };

        assert_eq!(topics("HABEAS"), vec!["Habeas corpus"]);
        assert_eq!(topics("simplify"), vec!["Fractions"]);
        assert_eq!(topics("constitutional"), vec!["Habeas corpus"]);
        assert_eq!(topics("").len(), 3);
        assert!(topics("chemistry").is_empty());
    }

    #[test]
    fn test_for_subject() {
        let mut log = ErrorLogStore::new();
        let subject_id = Uuid::new_v4();
        log.add(request(subject_id, "A", "Q"), Utc::now()).unwrap();
        log.add(request(Uuid::new_v4(), "B", "Q"), Utc::now()).unwrap();

        assert_eq!(log.for_subject(subject_id).count(), 1);
    }
}
