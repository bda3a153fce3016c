//! The fetch/compute/export orchestrator.

use crate::error::{PipelineError, PipelineStage};
use factor_data::{DataError, Sink, Source};
use factor_features::FeatureEngine;
use factor_types::PanelTable;

/// Observable state of a pipeline run.
///
/// `run()` drives `Idle -> Fetching -> Transforming -> Exporting -> Done`;
/// any stage failure moves to `Failed`, which is terminal for that run.
/// A new `run()` starts over from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// No run in progress.
    #[default]
    Idle,
    /// Acquiring the input table from the source.
    Fetching,
    /// Computing features.
    Transforming,
    /// Exporting the enriched table to the sinks.
    Exporting,
    /// Last run completed successfully.
    Done,
    /// Last run failed.
    Failed,
}

/// Sequences fetch, compute, and export with a single failure boundary.
///
/// Stages run strictly sequentially; the pipeline holds no shared
/// mutable state, so independent instances may run concurrently. The
/// pipeline performs no retries: recovering a failed fetch or write is
/// the source's or sink's own concern.
pub struct DataPipeline {
    source: Box<dyn Source>,
    engine: FeatureEngine,
    sinks: Vec<Box<dyn Sink>>,
    state: PipelineState,
}

impl std::fmt::Debug for DataPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataPipeline")
            .field("sinks", &self.sinks.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl DataPipeline {
    /// Creates a pipeline with no sinks (fetch + compute only).
    #[must_use]
    pub fn new(source: Box<dyn Source>, engine: FeatureEngine) -> Self {
        Self {
            source,
            engine,
            sinks: Vec::new(),
            state: PipelineState::Idle,
        }
    }

    /// Appends a sink; sinks run in the order they were added.
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Current run state.
    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Executes one full run and returns the enriched table.
    ///
    /// An empty fetch result is always an error; no partial report is
    /// produced.
    ///
    /// # Errors
    /// Returns [`PipelineError`] wrapping the failing stage's error.
    pub fn run(&mut self) -> Result<PanelTable, PipelineError> {
        self.state = PipelineState::Idle;
        tracing::info!("starting pipeline run");

        self.state = PipelineState::Fetching;
        let table = match self.source.fetch() {
            Ok(table) => table,
            Err(err) => return Err(self.fail(PipelineStage::Fetch, err)),
        };
        if table.is_empty() {
            return Err(self.fail(PipelineStage::Fetch, DataError::EmptyData));
        }
        tracing::debug!("fetched {} rows", table.num_rows());

        self.state = PipelineState::Transforming;
        let enriched = match self.engine.transform(&table) {
            Ok(enriched) => enriched,
            Err(err) => return Err(self.fail(PipelineStage::Transform, err)),
        };

        self.state = PipelineState::Exporting;
        let exported = self.sinks.iter().try_for_each(|sink| sink.export(&enriched));
        if let Err(err) = exported {
            return Err(self.fail(PipelineStage::Export, err));
        }

        self.state = PipelineState::Done;
        tracing::info!("pipeline run complete: {} rows", enriched.num_rows());
        Ok(enriched)
    }

    fn fail(
        &mut self,
        stage: PipelineStage,
        cause: impl Into<crate::error::PipelineCause>,
    ) -> PipelineError {
        self.state = PipelineState::Failed;
        let err = PipelineError::new(stage, cause);
        tracing::error!("{err}");
        err
    }
}
