use thiserror::Error;

use crate::dataset::ActivityTable;

pub const COL_NAME: &str = "Activity name";
pub const COL_DESCRIPTION: &str = "Activity description";
pub const COL_VISUALIZATION: &str = "Visualization";
pub const COL_MEMORY: &str = "Memory";
pub const COL_ASSOCIATION: &str = "Association";
pub const COL_REASONING: &str = "Reasoning";
pub const COL_AGE: &str = "Age";
pub const COL_ZONE: &str = "Zone";
pub const COL_TIME: &str = "Time";

/// A row lacks a column the knowledge base template needs.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Row {row} is missing required column '{column}'")]
pub struct MissingFieldError {
    pub column: &'static str,
    pub row: usize,
}

/// One activity from the dataset. Scores and duration are kept as the raw
/// cell text; the template only interpolates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub name: String,
    pub description: String,
    pub visualization: String,
    pub memory: String,
    pub association: String,
    pub reasoning: String,
    pub age: String,
    pub zone: String,
    /// Duration in minutes.
    pub time: String,
}

impl ActivityRecord {
    pub fn from_table(table: &ActivityTable, row: usize) -> Result<Self, MissingFieldError> {
        let field = |column: &'static str| {
            table
                .get(row, column)
                .map(str::to_string)
                .ok_or(MissingFieldError { column, row })
        };

        Ok(ActivityRecord {
            name: field(COL_NAME)?,
            description: field(COL_DESCRIPTION)?,
            visualization: field(COL_VISUALIZATION)?,
            memory: field(COL_MEMORY)?,
            association: field(COL_ASSOCIATION)?,
            reasoning: field(COL_REASONING)?,
            age: field(COL_AGE)?,
            zone: field(COL_ZONE)?,
            time: field(COL_TIME)?,
        })
    }
}
