//! Debounced snapshot writes
//!
//! Each key has at most one pending write. Scheduling a new snapshot for a
//! key cancels the pending one and restarts the quiet period, so a burst of
//! edits lands on disk as a single write of the latest state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::file_storage::{FileStorage, Result, StorageKey};

/// Quiet period before a scheduled snapshot is written
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_secs(5);

/// How long the "saved" notice stays visible after a write
pub const SAVED_NOTICE_WINDOW: Duration = Duration::from_secs(2);

/// Outcome of a background write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistEvent {
    Saved { key: StorageKey },
    Failed { key: StorageKey, message: String },
}

struct PendingWrite {
    generation: u64,
    payload: String,
    handle: JoinHandle<()>,
}

type PendingMap = Arc<Mutex<HashMap<StorageKey, PendingWrite>>>;

fn lock(pending: &PendingMap) -> MutexGuard<'_, HashMap<StorageKey, PendingWrite>> {
    pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Writes snapshots to [`FileStorage`] after a quiet period.
///
/// Must be used from within a Tokio runtime. Dropping the writer discards
/// every write still waiting for its quiet period; call [`flush`] first to
/// keep them.
///
/// [`flush`]: DebouncedWriter::flush
pub struct DebouncedWriter {
    storage: FileStorage,
    quiet_period: Duration,
    pending: PendingMap,
    next_generation: u64,
    events: mpsc::UnboundedSender<PersistEvent>,
}

impl DebouncedWriter {
    pub fn new(
        storage: FileStorage,
        quiet_period: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<PersistEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let writer = Self {
            storage,
            quiet_period,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_generation: 0,
            events: tx,
        };
        (writer, rx)
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Schedule a snapshot of `value` under `key`, replacing any pending one
    pub fn schedule<T: Serialize + ?Sized>(&mut self, key: StorageKey, value: &T) -> Result<()> {
        let payload = serde_json::to_string_pretty(value)?;
        self.next_generation += 1;
        let generation = self.next_generation;

        // Spawn while holding the lock so the task cannot observe the map
        // before its own entry is in place.
        let mut pending = lock(&self.pending);
        if let Some(previous) = pending.remove(&key) {
            previous.handle.abort();
            log::debug!("Restarted quiet period for snapshot '{}'", key);
        }

        let handle = tokio::spawn(write_after_quiet_period(
            self.storage.clone(),
            Arc::clone(&self.pending),
            self.events.clone(),
            key,
            generation,
            self.quiet_period,
        ));

        pending.insert(
            key,
            PendingWrite {
                generation,
                payload,
                handle,
            },
        );

        Ok(())
    }

    /// Keys with a write still waiting for its quiet period
    pub fn pending_keys(&self) -> Vec<StorageKey> {
        let mut keys: Vec<StorageKey> = lock(&self.pending).keys().copied().collect();
        keys.sort();
        keys
    }

    pub fn has_pending(&self) -> bool {
        !lock(&self.pending).is_empty()
    }

    /// Write every pending snapshot immediately. Returns how many were written.
    ///
    /// A failed write does not stop the others; every snapshot is attempted
    /// and the first error is returned afterwards. Failed snapshots are not
    /// kept for a retry.
    pub fn flush(&mut self) -> Result<usize> {
        let drained: Vec<(StorageKey, PendingWrite)> = lock(&self.pending).drain().collect();

        let mut written = 0;
        let mut first_error = None;
        for (key, write) in drained {
            write.handle.abort();
            match self.storage.write_raw(key, &write.payload) {
                Ok(()) => {
                    let _ = self.events.send(PersistEvent::Saved { key });
                    written += 1;
                }
                Err(e) => {
                    log::warn!("Failed to flush snapshot '{}': {}", key, e);
                    let _ = self.events.send(PersistEvent::Failed {
                        key,
                        message: e.to_string(),
                    });
                    first_error.get_or_insert(e);
                }
            }
        }

        if written > 0 {
            log::info!("Flushed {} pending snapshot(s)", written);
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(written),
        }
    }

    /// Drop every pending write without touching disk
    pub fn discard(&mut self) -> usize {
        let drained: Vec<(StorageKey, PendingWrite)> = lock(&self.pending).drain().collect();
        for (_, write) in &drained {
            write.handle.abort();
        }
        drained.len()
    }
}

impl Drop for DebouncedWriter {
    fn drop(&mut self) {
        let discarded = self.discard();
        if discarded > 0 {
            log::warn!("Discarded {} unsaved snapshot(s)", discarded);
        }
    }
}

async fn write_after_quiet_period(
    storage: FileStorage,
    pending: PendingMap,
    events: mpsc::UnboundedSender<PersistEvent>,
    key: StorageKey,
    generation: u64,
    quiet_period: Duration,
) {
    tokio::time::sleep(quiet_period).await;

    let payload = {
        let mut pending = lock(&pending);
        match pending.get(&key) {
            Some(write) if write.generation == generation => {
                pending.remove(&key).map(|write| write.payload)
            }
            _ => None,
        }
    };

    let Some(payload) = payload else {
        return;
    };

    let event = match storage.write_raw(key, &payload) {
        Ok(()) => PersistEvent::Saved { key },
        Err(e) => {
            log::warn!("Failed to write snapshot '{}': {}", key, e);
            PersistEvent::Failed {
                key,
                message: e.to_string(),
            }
        }
    };
    let _ = events.send(event);
}

/// Transient "saved" notice shown for [`SAVED_NOTICE_WINDOW`] after a write
#[derive(Debug, Clone, Copy, Default)]
pub struct SavedIndicator {
    shown_at: Option<Instant>,
}

impl SavedIndicator {
    pub fn show(&mut self, at: Instant) {
        self.shown_at = Some(at);
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.shown_at
            .map_or(false, |at| now.saturating_duration_since(at) < SAVED_NOTICE_WINDOW)
    }
}
