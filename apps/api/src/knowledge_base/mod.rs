//! Knowledge Base: the few example activities the prompt is steered with.
//!
//! Built once at startup from the dataset and shared read-only by every
//! request. Startup is fail-open: if the dataset cannot be loaded or rendered
//! the service still starts, with an empty snippet, and reports the cause as
//! `KnowledgeBase::Degraded` so `/health` can surface it.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::dataset::{load_dataset, ActivityTable, DataLoadError};
use crate::models::{ActivityRecord, MissingFieldError};

/// Number of example rows rendered when nothing else is configured.
pub const DEFAULT_EXAMPLES: usize = 3;

#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error(transparent)]
    Load(#[from] DataLoadError),

    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
}

/// Result of startup initialization.
#[derive(Debug, Clone)]
pub enum KnowledgeBase {
    Ready {
        snippet: String,
        examples: usize,
        built_at: DateTime<Utc>,
    },
    Degraded {
        snippet: String,
        cause: String,
        built_at: DateTime<Utc>,
    },
}

/// Serializable view for the health route.
#[derive(Debug, Serialize)]
pub struct KnowledgeBaseStatus {
    pub status: &'static str,
    pub examples: usize,
    pub built_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl KnowledgeBase {
    /// Loads the dataset at `path` and renders its first `num_examples` rows.
    /// Never fails; any error degrades to an empty snippet.
    pub fn initialize(path: impl AsRef<Path>, num_examples: usize) -> Self {
        let built_at = Utc::now();
        let result = load_dataset(path)
            .map_err(KnowledgeBaseError::from)
            .and_then(|table| {
                debug!("Dataset columns: {:?}", table.headers());
                if table.is_empty() {
                    warn!("Dataset has no rows; knowledge base will be empty");
                }
                let examples = num_examples.min(table.len());
                let snippet = build_knowledge_base(&table, num_examples)?;
                Ok((snippet, examples))
            });

        match result {
            Ok((snippet, examples)) => {
                info!(
                    "Knowledge base ready: {} examples, {} chars",
                    examples,
                    snippet.len()
                );
                KnowledgeBase::Ready {
                    snippet,
                    examples,
                    built_at,
                }
            }
            Err(e) => {
                error!("Error initializing knowledge base: {e}");
                KnowledgeBase::Degraded {
                    snippet: String::new(),
                    cause: e.to_string(),
                    built_at,
                }
            }
        }
    }

    pub fn snippet(&self) -> &str {
        match self {
            KnowledgeBase::Ready { snippet, .. } | KnowledgeBase::Degraded { snippet, .. } => {
                snippet
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, KnowledgeBase::Degraded { .. })
    }

    pub fn status(&self) -> KnowledgeBaseStatus {
        match self {
            KnowledgeBase::Ready {
                examples, built_at, ..
            } => KnowledgeBaseStatus {
                status: "ready",
                examples: *examples,
                built_at: *built_at,
                cause: None,
            },
            KnowledgeBase::Degraded {
                cause, built_at, ..
            } => KnowledgeBaseStatus {
                status: "degraded",
                examples: 0,
                built_at: *built_at,
                cause: Some(cause.clone()),
            },
        }
    }
}

/// Renders the first `num_examples` rows (fewer if the table is shorter),
/// one block per row, blocks separated by a blank line.
pub fn build_knowledge_base(
    table: &ActivityTable,
    num_examples: usize,
) -> Result<String, MissingFieldError> {
    let blocks = (0..num_examples.min(table.len()))
        .map(|row| ActivityRecord::from_table(table, row).map(|r| render_activity(&r)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(blocks.join("\n"))
}

fn render_activity(record: &ActivityRecord) -> String {
    format!(
        "Title: {}\n\
         Description: {}\n\
         Categories: Visualization={}, Memory={}, Association={}, Reasoning={}\n\
         Age: {}, Zone: {}, Duration: {} minutes\n",
        record.name,
        record.description,
        record.visualization,
        record.memory,
        record.association,
        record.reasoning,
        record.age,
        record.zone,
        record.time,
    )
}
