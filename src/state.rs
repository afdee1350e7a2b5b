//! The single owned application state

use crate::notebook::ErrorLogStore;
use crate::reviews::CompletionRecord;
use crate::storage::{FileStorage, Result, StorageKey};
use crate::subjects::SubjectStore;
use crate::timer::{SessionTimer, StudySession};

/// Everything the tracker knows, rehydrated from snapshots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudyState {
    pub subjects: SubjectStore,
    pub error_log: ErrorLogStore,
    /// Completed sessions in the order they finished
    pub sessions: Vec<StudySession>,
    pub completions: CompletionRecord,
    pub timer: Option<SessionTimer>,
}

impl StudyState {
    /// Load every snapshot; keys never written start empty
    pub fn load(storage: &FileStorage) -> Result<Self> {
        let state = Self {
            subjects: storage.load(StorageKey::Subjects)?.unwrap_or_default(),
            error_log: storage.load(StorageKey::ErrorLog)?.unwrap_or_default(),
            sessions: storage.load(StorageKey::StudyCycle)?.unwrap_or_default(),
            completions: storage.load(StorageKey::CompletedReviews)?.unwrap_or_default(),
            timer: storage.load(StorageKey::StudyTimer)?,
        };

        log::debug!(
            "Loaded state: {} subjects, {} errors, {} sessions, {} completed reviews",
            state.subjects.len(),
            state.error_log.len(),
            state.sessions.len(),
            state.completions.len()
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    use crate::notebook::NewErrorEntry;
    use crate::subjects::{SubjectCategory, SubjectColor};

    #[test]
    fn test_empty_directory_loads_default_state() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().to_path_buf());
        assert_eq!(StudyState::load(&storage).unwrap(), StudyState::default());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().to_path_buf());

        let mut state = StudyState::default();
        let subject = state
            .subjects
            .add("Portuguese", SubjectCategory::Theoretical, SubjectColor::Orange)
            .unwrap();
        let entry = state
            .error_log
            .add(
                NewErrorEntry {
                    subject_id: subject.id,
                    topic: "Crase".to_string(),
                    question: "Before 'a partir de'?".to_string(),
                    explanation: Some("Never".to_string()),
                },
                Utc::now(),
            )
            .unwrap();
        state.completions.mark_complete(entry.id, entry.review_dates[0]);
        state.sessions.push(StudySession::completed(subject.id, Utc::now()));
        state.timer = Some(SessionTimer::new(Some(subject.id)));

        storage.save(StorageKey::Subjects, &state.subjects).unwrap();
        storage.save(StorageKey::ErrorLog, &state.error_log).unwrap();
        storage.save(StorageKey::StudyCycle, &state.sessions).unwrap();
        storage.save(StorageKey::CompletedReviews, &state.completions).unwrap();
        storage.save(StorageKey::StudyTimer, state.timer.as_ref().unwrap()).unwrap();
        let reloaded = StudyState::load(&storage).unwrap();
        assert_eq!(reloaded, state);
    }
}
