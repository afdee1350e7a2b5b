//! Study timer: 60-minute focus blocks with optional 5-minute breaks

pub mod models;
pub mod session;

pub use models::*;
pub use session::{format_time, SessionTimer, TimerError, BREAK_SECS, FOCUS_SECS};
