//! Config-driven pipeline construction and execution.

use crate::config::{PipelineConfig, SinkConfig};
use crate::error::{PipelineCause, PipelineError, PipelineStage};
use crate::pipeline::DataPipeline;
use factor_data::{
    resolve_data_root, CsvSink, DateRange, ParquetSink, ParquetSource, Sink,
};
use factor_features::{FeatureEngine, FeatureRegistry};
use factor_types::{parse_date_ns, PanelTable, NANOS_PER_DAY};

/// Main entry point: receives config JSON, runs the pipeline, and
/// returns the enriched table.
///
/// # Errors
/// - [`PipelineStage::Configure`] errors for JSON parse failures,
///   invalid configuration values, and feature construction failures.
/// - Any error from pipeline execution.
pub fn run_pipeline_from_json(config_json: &str) -> Result<PanelTable, PipelineError> {
    let config: PipelineConfig = serde_json::from_str(config_json).map_err(|e| {
        PipelineError::new(
            PipelineStage::Configure,
            PipelineCause::ConfigParse(e.to_string()),
        )
    })?;

    let mut pipeline = build_pipeline(&config)?;
    pipeline.run()
}

/// Builds a pipeline from a validated configuration.
///
/// # Errors
/// Returns [`PipelineStage::Configure`] errors for invalid
/// configuration values or unknown/invalid features.
pub fn build_pipeline(config: &PipelineConfig) -> Result<DataPipeline, PipelineError> {
    validate_config(config)?;

    let root = config
        .data_root
        .clone()
        .unwrap_or_else(resolve_data_root);
    let mut source = ParquetSource::new(root, config.identifiers.clone());
    if let Some(range) = parse_range(config)? {
        source = source.with_range(range);
    }

    let registry = FeatureRegistry::with_defaults();
    let engine = FeatureEngine::from_specs(&config.features, &registry)
        .map_err(|e| PipelineError::new(PipelineStage::Configure, e))?;

    let mut pipeline = DataPipeline::new(Box::new(source), engine);
    for sink in &config.sinks {
        let sink: Box<dyn Sink> = match sink {
            SinkConfig::Parquet { path } => Box::new(ParquetSink::new(path.clone())),
            SinkConfig::Csv { path } => Box::new(CsvSink::new(path.clone())),
        };
        pipeline = pipeline.with_sink(sink);
    }

    Ok(pipeline)
}

fn validate_config(config: &PipelineConfig) -> Result<(), PipelineError> {
    if config.identifiers.is_empty() {
        return Err(validation_error("identifiers is empty"));
    }
    if config.identifiers.iter().any(|id| id.trim().is_empty()) {
        return Err(validation_error("identifiers must be non-empty strings"));
    }

    if config.features.is_empty() {
        return Err(validation_error("features is empty"));
    }
    for spec in &config.features {
        if spec.period == 0 {
            return Err(validation_error(format!(
                "feature '{}' period must be >= 1",
                spec.kind
            )));
        }
    }

    Ok(())
}

fn parse_range(config: &PipelineConfig) -> Result<Option<DateRange>, PipelineError> {
    match (&config.start_date, &config.end_date) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => {
            let start_ns = parse_date_ns(start)
                .map_err(|e| validation_error(e.to_string()))?;
            let end_ns = parse_date_ns(end)
                .map_err(|e| validation_error(e.to_string()))?
                + (NANOS_PER_DAY - 1);
            if start_ns >= end_ns {
                return Err(validation_error("start_date must be before end_date"));
            }
            Ok(Some(DateRange { start_ns, end_ns }))
        }
        _ => Err(validation_error(
            "start_date and end_date must be provided together",
        )),
    }
}

fn validation_error(msg: impl Into<String>) -> PipelineError {
    PipelineError::new(
        PipelineStage::Configure,
        PipelineCause::ConfigValidation(msg.into()),
    )
}
