//! In-memory subject collection with the study cycle limits

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::models::{Subject, SubjectCategory, SubjectColor};

/// Maximum number of subjects in the study cycle
pub const MAX_SUBJECTS: usize = 6;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubjectError {
    #[error("Subject name must not be empty")]
    EmptyName,

    #[error("A subject named '{0}' already exists")]
    DuplicateName(String),

    #[error("Subject limit reached: at most {0} subjects")]
    LimitReached(usize),

    #[error("Subject not found: {0}")]
    NotFound(String),

    #[error("Ambiguous subject '{query}', matches: {}", .matches.join(", "))]
    Ambiguous { query: String, matches: Vec<String> },

    #[error("Invalid study time: {0} hours")]
    InvalidHours(f64),
}

pub type Result<T> = std::result::Result<T, SubjectError>;

/// Ordered subject list. Order is the study rotation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectStore {
    subjects: Vec<Subject>,
}

impl SubjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// Add a subject to the end of the rotation
    pub fn add(
        &mut self,
        name: &str,
        category: SubjectCategory,
        color: SubjectColor,
    ) -> Result<Subject> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SubjectError::EmptyName);
        }

        if self.subjects.len() >= MAX_SUBJECTS {
            return Err(SubjectError::LimitReached(MAX_SUBJECTS));
        }

        let lower = name.to_lowercase();
        if self.subjects.iter().any(|s| s.name.to_lowercase() == lower) {
            return Err(SubjectError::DuplicateName(name.to_string()));
        }

        let subject = Subject::new(name.to_string(), category, color);
        self.subjects.push(subject.clone());
        log::info!("Added subject '{}' ({})", subject.name, subject.id);

        Ok(subject)
    }

    /// Remove a subject. Error entries logged against it are left alone.
    pub fn remove(&mut self, id: Uuid) -> Result<Subject> {
        let pos = self
            .subjects
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| SubjectError::NotFound(id.to_string()))?;

        let removed = self.subjects.remove(pos);
        log::info!("Removed subject '{}' ({})", removed.name, removed.id);
        Ok(removed)
    }

    /// Credit study time to a subject
    pub fn add_study_time(&mut self, id: Uuid, hours: f64) -> Result<&Subject> {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(SubjectError::InvalidHours(hours));
        }

        let subject = self
            .subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| SubjectError::NotFound(id.to_string()))?;

        subject.total_hours += hours;
        Ok(subject)
    }

    /// Find a subject by id, exact name or unique name prefix (case-insensitive)
    pub fn find(&self, query: &str) -> Result<&Subject> {
        let query = query.trim();

        if let Ok(id) = Uuid::parse_str(query) {
            if let Some(subject) = self.get(id) {
                return Ok(subject);
            }
        }

        let lower = query.to_lowercase();
        if let Some(subject) = self.subjects.iter().find(|s| s.name.to_lowercase() == lower) {
            return Ok(subject);
        }

        let matches: Vec<&Subject> = self
            .subjects
            .iter()
            .filter(|s| s.name.to_lowercase().starts_with(&lower))
            .collect();

        match matches.len() {
            0 => Err(SubjectError::NotFound(query.to_string())),
            1 => Ok(matches[0]),
            _ => Err(SubjectError::Ambiguous {
                query: query.to_string(),
                matches: matches.iter().map(|s| s.name.clone()).collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(names: &[&str]) -> SubjectStore {
        let mut store = SubjectStore::new();
        for name in names {
            store
                .add(name, SubjectCategory::Theoretical, SubjectColor::Blue)
                .unwrap();
        }
        store
    }

    #[test]
    fn test_add_and_list_in_order() {
        let store = store_with(&["Math", "Portuguese", "Law"]);
        let names: Vec<&str> = store.list().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Math", "Portuguese", "Law"]);
    }

    #[test]
    fn test_add_trims_and_rejects_empty_name() {
        let mut store = SubjectStore::new();
        assert_eq!(
            store.add("   ", SubjectCategory::Mixed, SubjectColor::Green),
            Err(SubjectError::EmptyName)
        );

        let subject = store
            .add("  Physics ", SubjectCategory::Practical, SubjectColor::Green)
            .unwrap();
        assert_eq!(subject.name, "Physics");
        assert_eq!(subject.total_hours, 0.0);
    }

    #[test]
    fn test_duplicate_name_rejected_case_insensitively() {
        let mut store = store_with(&["Math"]);
        let result = store.add("MATH", SubjectCategory::Theoretical, SubjectColor::Pink);
        assert_eq!(result, Err(SubjectError::DuplicateName("MATH".to_string())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_limit_of_six_subjects() {
        let mut store = store_with(&["A", "B", "C", "D", "E", "F"]);
        let result = store.add("G", SubjectCategory::Theoretical, SubjectColor::Blue);
        assert_eq!(result, Err(SubjectError::LimitReached(MAX_SUBJECTS)));
        assert_eq!(store.len(), MAX_SUBJECTS);

        let first = store.list()[0].id;
        store.remove(first).unwrap();
        assert!(store
            .add("G", SubjectCategory::Theoretical, SubjectColor::Blue)
            .is_ok());
    }

    #[test]
    fn test_remove_unknown_subject() {
        let mut store = store_with(&["Math"]);
        assert!(matches!(
            store.remove(Uuid::new_v4()),
            Err(SubjectError::NotFound(_))
        ));
    }

    #[test]
    fn test_add_study_time() {
        let mut store = store_with(&["Math"]);
        let id = store.list()[0].id;

        store.add_study_time(id, 1.0).unwrap();
        let subject = store.add_study_time(id, 0.5).unwrap();
        assert_eq!(subject.total_hours, 1.5);

        assert_eq!(
            store.add_study_time(id, -1.0).unwrap_err(),
            SubjectError::InvalidHours(-1.0)
        );
    }

    #[test]
    fn test_find_by_id_name_and_prefix() {
        let store = store_with(&["Mathematics", "Medicine", "Law"]);
        let law = store.list()[2].clone();

        assert_eq!(store.find(&law.id.to_string()).unwrap().id, law.id);
        assert_eq!(store.find("law").unwrap().id, law.id);
        assert_eq!(store.find("math").unwrap().name, "Mathematics");
        assert!(matches!(store.find("m"), Err(SubjectError::Ambiguous { .. })));
        assert!(matches!(store.find("chemistry"), Err(SubjectError::NotFound(_))));
    }
}
