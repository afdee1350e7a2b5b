pub mod dashboard;
pub mod errors;
pub mod reviews;
pub mod subjects;
