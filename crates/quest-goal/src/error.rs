// error.rs — Error types for the goal model and its persistence.

use thiserror::Error;

/// Errors that can occur while building, recording, saving or loading goals.
///
/// Load failures (`UnsupportedGoalType`, `MalformedRecord`) are raised before
/// any in-memory state is replaced, so callers can report them and carry on
/// with the goals they already have.
#[derive(Debug, Error)]
pub enum GoalError {
    /// A persisted record carried a `kind` tag that is not a known goal variant.
    #[error("unsupported goal type '{kind}' in record {index}")]
    UnsupportedGoalType { index: usize, kind: String },

    /// A persisted record is missing a required field, has a field of the
    /// wrong type, or describes a goal that breaks the model's invariants.
    /// `index` is `None` when the document itself is not a record sequence.
    #[error("malformed record{}: {reason}", record_label(.index))]
    MalformedRecord {
        index: Option<usize>,
        reason: String,
    },

    /// The backing file could not be read or written.
    #[error("storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: String,
        source: std::io::Error,
    },

    /// Goal construction parameters were rejected.
    #[error("invalid goal: {0}")]
    InvalidGoal(String),

    /// No goal exists at the given position.
    #[error("no goal at position {0}")]
    GoalNotFound(usize),

    /// Failed to serialize goal data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A notification sink failed (non-fatal).
    #[error("notification error: {0}")]
    NotificationError(String),
}

fn record_label(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" {}", i),
        None => String::new(),
    }
}

impl GoalError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        GoalError::MalformedRecord {
            index: Some(index),
            reason: reason.into(),
        }
    }

    pub(crate) fn storage(path: &std::path::Path, source: std::io::Error) -> Self {
        GoalError::StorageUnavailable {
            path: path.display().to_string(),
            source,
        }
    }
}
