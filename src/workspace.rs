//! Application coordinator
//!
//! Owns the [`StudyState`] and routes every mutation to the debounced
//! writer, so views and commands never touch storage directly.

use std::time::Instant;

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::config::Settings;
use crate::dashboard::{self, DashboardSummary};
use crate::notebook::{ErrorEntry, ErrorLogError, NewErrorEntry};
use crate::reviews::{bucket, compute_agenda, ReviewBuckets, ReviewItem, ReviewStats};
use crate::state::StudyState;
use crate::storage::{
    DebouncedWriter, FileStorage, PersistEvent, SavedIndicator, StorageError, StorageKey,
};
use crate::subjects::{Subject, SubjectCategory, SubjectColor, SubjectError};
use crate::timer::{SessionTimer, StudySession};

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Subject(#[from] SubjectError),

    #[error(transparent)]
    ErrorLog(#[from] ErrorLogError),

    #[error("Unknown subject: {0}")]
    UnknownSubject(Uuid),
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;

pub struct Workspace {
    state: StudyState,
    writer: DebouncedWriter,
    events: mpsc::UnboundedReceiver<PersistEvent>,
    saved: SavedIndicator,
    daily_goal_hours: f64,
}

impl Workspace {
    /// Rehydrate state from `storage`. Must be called within a Tokio runtime.
    pub fn open(storage: FileStorage, settings: &Settings) -> Result<Self> {
        storage.init()?;
        let state = StudyState::load(&storage)?;
        let (writer, events) = DebouncedWriter::new(storage, settings.save_quiet_period());

        Ok(Self {
            state,
            writer,
            events,
            saved: SavedIndicator::default(),
            daily_goal_hours: settings.daily_goal_hours,
        })
    }

    pub fn state(&self) -> &StudyState {
        &self.state
    }

    pub fn storage(&self) -> &FileStorage {
        self.writer.storage()
    }

    fn persist(&mut self, key: StorageKey) -> Result<()> {
        match key {
            StorageKey::Subjects => self.writer.schedule(key, &self.state.subjects)?,
            StorageKey::StudyCycle => self.writer.schedule(key, &self.state.sessions)?,
            StorageKey::ErrorLog => self.writer.schedule(key, &self.state.error_log)?,
            StorageKey::CompletedReviews => self.writer.schedule(key, &self.state.completions)?,
            StorageKey::StudyTimer => match &self.state.timer {
                Some(timer) => self.writer.schedule(key, timer)?,
                None => {}
            },
        }
        Ok(())
    }

    // ===== Subjects =====

    pub fn add_subject(
        &mut self,
        name: &str,
        category: SubjectCategory,
        color: SubjectColor,
    ) -> Result<Subject> {
        let subject = self.state.subjects.add(name, category, color)?;
        self.persist(StorageKey::Subjects)?;
        Ok(subject)
    }

    pub fn remove_subject(&mut self, id: Uuid) -> Result<Subject> {
        let subject = self.state.subjects.remove(id)?;
        self.persist(StorageKey::Subjects)?;
        Ok(subject)
    }

    pub fn log_study_time(&mut self, id: Uuid, hours: f64) -> Result<Subject> {
        let subject = self.state.subjects.add_study_time(id, hours)?.clone();
        self.persist(StorageKey::Subjects)?;
        Ok(subject)
    }

    // ===== Error log =====

    pub fn log_error(&mut self, request: NewErrorEntry, now: DateTime<Utc>) -> Result<ErrorEntry> {
        if self.state.subjects.get(request.subject_id).is_none() {
            return Err(WorkspaceError::UnknownSubject(request.subject_id));
        }

        let entry = self.state.error_log.add(request, now)?;
        self.persist(StorageKey::ErrorLog)?;
        Ok(entry)
    }

    /// Remove an entry together with its completed reviews
    pub fn remove_error(&mut self, id: Uuid) -> Result<ErrorEntry> {
        let entry = self.state.error_log.remove(id)?;
        self.persist(StorageKey::ErrorLog)?;

        if self.state.completions.forget_entry(id) > 0 {
            self.persist(StorageKey::CompletedReviews)?;
        }
        Ok(entry)
    }

    pub fn search_errors(&self, term: &str) -> Vec<&ErrorEntry> {
        self.state
            .error_log
            .search(term, self.state.subjects.list())
    }

    // ===== Reviews =====

    pub fn agenda(&self, now: DateTime<Utc>) -> Vec<ReviewItem<'_>> {
        compute_agenda(self.state.error_log.list(), now)
    }

    pub fn review_buckets(&self, now: DateTime<Utc>) -> ReviewBuckets<'_> {
        bucket(&self.agenda(now))
    }

    pub fn review_stats(&self, now: DateTime<Utc>) -> ReviewStats {
        ReviewStats::new(&self.review_buckets(now), self.state.completions.len())
    }

    /// Mark one review occurrence as done. Returns `false` if it already was.
    ///
    /// The completion set is saved either way, so a repeated mark still
    /// raises the saved notice.
    pub fn mark_review_complete(&mut self, entry_id: Uuid, review_date: DateTime<Utc>) -> Result<bool> {
        let inserted = self.state.completions.mark_complete(entry_id, review_date);
        self.persist(StorageKey::CompletedReviews)?;
        Ok(inserted)
    }

    pub fn is_review_complete(&self, entry_id: Uuid, review_date: DateTime<Utc>) -> bool {
        self.state.completions.is_complete(entry_id, review_date)
    }

    // ===== Sessions and timer =====

    /// Record a finished session and credit its time to the subject
    pub fn record_session(&mut self, session: StudySession) -> Result<()> {
        if session.completed {
            let credited = self
                .state
                .subjects
                .add_study_time(session.subject_id, session.hours())
                .map(|_| ());
            match credited {
                Ok(_) => self.persist(StorageKey::Subjects)?,
                Err(SubjectError::NotFound(_)) => {
                    log::warn!("Session recorded for removed subject {}", session.subject_id)
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.state.sessions.push(session);
        self.persist(StorageKey::StudyCycle)
    }

    pub fn save_timer(&mut self, timer: &SessionTimer) -> Result<()> {
        self.state.timer = Some(timer.clone());
        self.persist(StorageKey::StudyTimer)
    }

    pub fn next_subject(&self) -> Option<&Subject> {
        dashboard::next_subject(self.state.subjects.list(), &self.state.sessions)
    }

    pub fn dashboard<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DashboardSummary {
        dashboard::summarize(&self.state, self.daily_goal_hours, now)
    }

    // ===== Persistence =====

    /// Drain write outcomes; a landed write shows the saved notice.
    /// Returns whether the notice is currently visible.
    pub fn poll_saved(&mut self, now: Instant) -> bool {
        while let Ok(event) = self.events.try_recv() {
            match event {
                PersistEvent::Saved { key } => {
                    log::debug!("Snapshot '{}' saved", key);
                    self.saved.show(now);
                }
                PersistEvent::Failed { key, message } => {
                    log::warn!("Snapshot '{}' not saved: {}", key, message);
                }
            }
        }
        self.saved.is_visible(now)
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.writer.has_pending()
    }

    /// Write every pending snapshot now
    pub fn flush(&mut self) -> Result<usize> {
        Ok(self.writer.flush()?)
    }
}
