//! Feature error types.

use thiserror::Error;

/// Errors that can occur during feature construction or batch execution.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// An engine was constructed without any features
    #[error("feature engine requires at least one feature")]
    EmptyFeatureSet,

    /// Structurally invalid feature parameters (e.g. zero window)
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Unknown feature kind requested from the registry
    #[error("unknown feature: {0}")]
    UnknownFeature(String),

    /// A referenced data/sort/group column is absent from the input table
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// Table construction failed while merging output columns
    #[error("table error: {0}")]
    Table(#[from] factor_types::TableError),
}

impl FeatureError {
    /// Creates an `InvalidParams` error with a message.
    #[must_use]
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        FeatureError::InvalidParams(msg.into())
    }
}
