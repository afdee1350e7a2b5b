//! Error notebook: logged mistakes tied to a subject

pub mod models;
pub mod store;

pub use models::*;
pub use store::{ErrorLogError, ErrorLogStore};
