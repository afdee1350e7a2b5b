//! Study subjects and the study cycle

pub mod models;
pub mod store;

pub use models::*;
pub use store::{SubjectError, SubjectStore, MAX_SUBJECTS};
