pub mod activity;

pub use activity::{ActivityRecord, MissingFieldError};
