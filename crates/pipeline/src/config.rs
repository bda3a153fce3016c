//! Pipeline configuration records.

use std::path::PathBuf;

use factor_features::FeatureSpec;

/// Declarative pipeline configuration, deserializable from JSON.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PipelineConfig {
    /// Identifiers to fetch.
    pub identifiers: Vec<String>,
    /// Panel data root; falls back to the canonical root (or the
    /// `FACTOR_DATA_ROOT` override) when absent.
    #[serde(default)]
    pub data_root: Option<PathBuf>,
    /// Inclusive start date (`YYYY-MM-DD`), paired with `end_date`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Inclusive end date (`YYYY-MM-DD`), paired with `start_date`.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Features to compute, in order.
    pub features: Vec<FeatureSpec>,
    /// Sinks to export to, in order. May be empty (fetch + compute only).
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

/// One configured sink.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkConfig {
    /// Parquet master table.
    Parquet {
        /// Target file path.
        path: PathBuf,
    },
    /// CSV master table.
    Csv {
        /// Target file path.
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserializes_minimal() {
        let config: PipelineConfig = serde_json::from_str(
            r#"{
                "identifiers": ["AAPL"],
                "features": [
                    {"kind": "sma", "column": "close", "period": 21, "sort_by": "date"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.identifiers, vec!["AAPL".to_string()]);
        assert_eq!(config.data_root, None);
        assert!(config.sinks.is_empty());
        assert_eq!(config.features.len(), 1);
    }

    #[test]
    fn test_config_deserializes_sinks() {
        let config: PipelineConfig = serde_json::from_str(
            r#"{
                "identifiers": ["AAPL"],
                "features": [
                    {"kind": "rsi", "column": "close", "period": 14,
                     "sort_by": "date", "group_by": "identifier"}
                ],
                "sinks": [
                    {"kind": "parquet", "path": "reports/master.parquet"},
                    {"kind": "csv", "path": "reports/master.csv"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.sinks,
            vec![
                SinkConfig::Parquet {
                    path: PathBuf::from("reports/master.parquet")
                },
                SinkConfig::Csv {
                    path: PathBuf::from("reports/master.csv")
                },
            ]
        );
    }
}
