//! Pipeline error boundary types.

use thiserror::Error;

use factor_data::DataError;
use factor_features::FeatureError;

/// Stage of a pipeline run in which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Config parsing/validation and pipeline construction.
    Configure,
    /// Source acquisition.
    Fetch,
    /// Feature computation.
    Transform,
    /// Sink export.
    Export,
}

impl PipelineStage {
    /// Stage name as it appears in error messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Configure => "configure",
            PipelineStage::Fetch => "fetch",
            PipelineStage::Transform => "transform",
            PipelineStage::Export => "export",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Originating error behind a pipeline failure.
#[derive(Debug, Error)]
pub enum PipelineCause {
    /// JSON config parse error
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error
    #[error("config validation error: {0}")]
    ConfigValidation(String),

    /// Data loading, validation, or export error
    #[error(transparent)]
    Data(#[from] DataError),

    /// Feature construction or computation error
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// The single externally visible error for a pipeline run.
///
/// Wraps the originating error exactly once with the stage in which it
/// occurred; the original error stays reachable through
/// [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("pipeline failed during {stage}: {cause}")]
pub struct PipelineError {
    /// Stage in which the failure occurred.
    pub stage: PipelineStage,
    /// Originating error.
    #[source]
    pub cause: PipelineCause,
}

impl PipelineError {
    /// Creates a pipeline error for a stage.
    #[must_use]
    pub fn new(stage: PipelineStage, cause: impl Into<PipelineCause>) -> Self {
        Self {
            stage,
            cause: cause.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_stage_and_cause() {
        let err = PipelineError::new(PipelineStage::Fetch, DataError::EmptyData);
        assert_eq!(err.to_string(), "pipeline failed during fetch: Empty data");
    }

    #[test]
    fn test_error_chains_original_cause() {
        use std::error::Error;

        let err = PipelineError::new(PipelineStage::Transform, FeatureError::EmptyFeatureSet);
        let source = err.source().expect("cause is chained");
        assert_eq!(
            source.to_string(),
            "feature engine requires at least one feature"
        );
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(PipelineStage::Configure.as_str(), "configure");
        assert_eq!(PipelineStage::Fetch.as_str(), "fetch");
        assert_eq!(PipelineStage::Transform.as_str(), "transform");
        assert_eq!(PipelineStage::Export.as_str(), "export");
    }
}
