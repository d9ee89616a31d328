// Activity dataset: workbook or CSV file → in-memory table with trimmed column labels.
// Loaded once at startup; nothing here is touched per request.

pub mod loader;

pub use loader::{load_dataset, ActivityTable, DataLoadError};
