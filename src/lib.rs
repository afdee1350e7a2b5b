//! Personal study tracker: subjects, a focus timer, an error notebook with
//! spaced-repetition reviews, and a daily dashboard.

pub mod config;
pub mod dashboard;
pub mod notebook;
pub mod reviews;
pub mod state;
pub mod storage;
pub mod subjects;
pub mod timer;
pub mod workspace;

pub use config::Settings;
pub use state::StudyState;
pub use workspace::{Workspace, WorkspaceError};
