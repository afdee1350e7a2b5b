mod debounce;
mod file_storage;

pub use debounce::{
    DebouncedWriter, PersistEvent, SavedIndicator, DEFAULT_QUIET_PERIOD, SAVED_NOTICE_WINDOW,
};
pub use file_storage::{FileStorage, Result, StorageError, StorageKey};
