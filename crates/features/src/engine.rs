//! Batch feature engine.
//!
//! Applies an ordered collection of features to a panel table in one
//! logical pass: the group/sort row ordering is built once and shared,
//! feature kernels run in parallel, and outputs are merged in feature
//! order.

use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::error::FeatureError;
use crate::registry::FeatureRegistry;
use crate::traits::{Feature, FeatureSpec};
use factor_types::PanelTable;

/// Composes an ordered, non-empty collection of features and executes
/// them as one batch against a panel table.
///
/// Every feature is a pure read of the original input columns, so the
/// engine is deterministic and idempotent: re-running on an already
/// enriched table reproduces identical values in the shared columns.
pub struct FeatureEngine {
    features: Vec<Arc<dyn Feature>>,
}

impl FeatureEngine {
    /// Creates an engine from an ordered feature collection.
    ///
    /// # Errors
    /// Returns [`FeatureError::EmptyFeatureSet`] when `features` is empty.
    pub fn new(features: Vec<Arc<dyn Feature>>) -> Result<Self, FeatureError> {
        if features.is_empty() {
            return Err(FeatureError::EmptyFeatureSet);
        }
        Ok(Self { features })
    }

    /// Creates an engine by building every spec through a registry.
    ///
    /// # Errors
    /// Propagates registry errors and rejects an empty spec list with
    /// [`FeatureError::EmptyFeatureSet`].
    pub fn from_specs(
        specs: &[FeatureSpec],
        registry: &FeatureRegistry,
    ) -> Result<Self, FeatureError> {
        let features = specs
            .iter()
            .map(|spec| registry.create(spec))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(features)
    }

    /// Number of configured features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` when no features are configured (never, by
    /// construction).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Applies all features and returns a new table with one output
    /// column appended per feature, in feature order. When two features
    /// produce the same output name, the later one wins.
    ///
    /// A zero-row table passes through with empty output columns.
    ///
    /// # Errors
    /// Returns [`FeatureError::ColumnNotFound`] when a feature references
    /// a data, sort, or group column absent from the table.
    pub fn transform(&self, table: &PanelTable) -> Result<PanelTable, FeatureError> {
        let inputs = self.validate_columns(table)?;

        let orderings = Orderings::build(table, &self.features);

        let outputs: Vec<(String, Vec<f64>)> = self
            .features
            .par_iter()
            .zip(inputs.par_iter())
            .map(|(feature, column)| {
                let groups = orderings.for_feature(feature.as_ref());

                let mut values = vec![f64::NAN; table.num_rows()];
                for indices in groups {
                    let series: Vec<f64> = indices.iter().map(|&i| column[i]).collect();
                    let computed = feature.compute(&series);
                    for (&row, value) in indices.iter().zip(computed) {
                        values[row] = value;
                    }
                }

                (feature.name(), values)
            })
            .collect();

        let mut result = table.clone();
        for (name, values) in outputs {
            result = result.with_column(name, values)?;
        }

        tracing::info!("applied {} features", self.features.len());
        Ok(result)
    }

    /// Resolves every feature's input column up front, so a bad
    /// reference fails before any kernel runs.
    fn validate_columns<'t>(
        &self,
        table: &'t PanelTable,
    ) -> Result<Vec<&'t [f64]>, FeatureError> {
        let mut inputs = Vec::with_capacity(self.features.len());
        for feature in &self.features {
            let column = table.column(feature.input_column()).ok_or_else(|| {
                FeatureError::ColumnNotFound(feature.input_column().to_string())
            })?;
            if feature.sort_key() != table.date_column() {
                return Err(FeatureError::ColumnNotFound(feature.sort_key().to_string()));
            }
            if let Some(group) = feature.group_key() {
                if group != table.identifier_column() {
                    return Err(FeatureError::ColumnNotFound(group.to_string()));
                }
            }
            inputs.push(column);
        }
        Ok(inputs)
    }
}

/// Row orderings shared by all features: built once per transform.
struct Orderings {
    /// Per-identifier index lists, each sorted by date.
    grouped: Vec<Vec<usize>>,
    /// Single whole-table index list sorted by date.
    flat: Vec<Vec<usize>>,
}

impl Orderings {
    fn build(table: &PanelTable, features: &[Arc<dyn Feature>]) -> Self {
        let dates = table.dates_ns();

        let grouped = if features.iter().any(|f| f.group_key().is_some()) {
            let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
            for (row, id) in table.identifiers().iter().enumerate() {
                groups.entry(id.as_str()).or_default().push(row);
            }
            let mut grouped: Vec<Vec<usize>> = groups.into_values().collect();
            for indices in &mut grouped {
                indices.sort_by_key(|&row| dates[row]);
            }
            grouped
        } else {
            Vec::new()
        };

        let flat = if features.iter().any(|f| f.group_key().is_none()) {
            let mut indices: Vec<usize> = (0..table.num_rows()).collect();
            indices.sort_by_key(|&row| dates[row]);
            vec![indices]
        } else {
            Vec::new()
        };

        Self { grouped, flat }
    }

    fn for_feature(&self, feature: &dyn Feature) -> &[Vec<usize>] {
        if feature.group_key().is_some() {
            &self.grouped
        } else {
            &self.flat
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impl_::{moving_average::MovingAverage, returns::Returns};
    use factor_types::{Column, NANOS_PER_DAY};

    fn day(n: i64) -> i64 {
        n * NANOS_PER_DAY
    }

    fn single_asset_table() -> PanelTable {
        PanelTable::try_new(
            vec!["AAPL".to_string(); 5],
            (1..=5).map(day).collect(),
            vec![Column::new(
                "close",
                vec![100.0, 102.0, 104.0, 106.0, 108.0],
            )],
        )
        .unwrap()
    }

    fn sma(window: usize) -> Arc<dyn Feature> {
        Arc::new(
            MovingAverage::new("close", window, "date", Some("identifier".to_string()))
                .unwrap(),
        )
    }

    #[test]
    fn test_engine_rejects_empty_feature_list() {
        let result = FeatureEngine::new(vec![]);
        assert!(matches!(result, Err(FeatureError::EmptyFeatureSet)));
    }

    #[test]
    fn test_transform_appends_columns_and_preserves_input() {
        let table = single_asset_table();
        let engine = FeatureEngine::new(vec![sma(2), sma(3)]).unwrap();

        let result = engine.transform(&table).unwrap();

        assert_eq!(result.column_names(), vec!["close", "sma_2d", "sma_3d"]);
        assert_eq!(
            result.column("close"),
            Some(&[100.0, 102.0, 104.0, 106.0, 108.0][..])
        );
        // Input table is untouched
        assert_eq!(table.column_names(), vec!["close"]);

        let sma2 = result.column("sma_2d").unwrap();
        assert!(sma2[0].is_nan());
        assert!((sma2[1] - 101.0).abs() < 1e-10);
        assert!((sma2[4] - 107.0).abs() < 1e-10);

        let sma3 = result.column("sma_3d").unwrap();
        assert!(sma3[0].is_nan());
        assert!(sma3[1].is_nan());
        assert!((sma3[2] - 102.0).abs() < 1e-10);
        assert!((sma3[4] - 106.0).abs() < 1e-10);
    }

    #[test]
    fn test_transform_unsorted_input_matches_sorted() {
        let sorted = single_asset_table();
        let shuffled = PanelTable::try_new(
            vec!["AAPL".to_string(); 5],
            vec![day(3), day(1), day(5), day(2), day(4)],
            vec![Column::new(
                "close",
                vec![104.0, 100.0, 108.0, 102.0, 106.0],
            )],
        )
        .unwrap();

        let engine = FeatureEngine::new(vec![sma(2)]).unwrap();
        let from_sorted = engine.transform(&sorted).unwrap();
        let from_shuffled = engine.transform(&shuffled).unwrap();

        // Row 0 of the shuffled table is day 3: sma_2d = (102 + 104) / 2
        let values = from_shuffled.column("sma_2d").unwrap();
        assert!((values[0] - 103.0).abs() < 1e-10);
        assert!(values[1].is_nan());
        assert!((values[2] - 107.0).abs() < 1e-10);
        assert!((values[3] - 101.0).abs() < 1e-10);
        assert!((values[4] - 105.0).abs() < 1e-10);

        // Same logical values as the sorted table, keyed by date
        let sorted_values = from_sorted.column("sma_2d").unwrap();
        for (i, &date) in from_shuffled.dates_ns().iter().enumerate() {
            let j = from_sorted.dates_ns().iter().position(|&d| d == date).unwrap();
            let a = values[i];
            let b = sorted_values[j];
            assert!(a == b || (a.is_nan() && b.is_nan()));
        }
    }

    #[test]
    fn test_transform_grouping_isolation() {
        // Two interleaved groups; each must be windowed independently.
        let table = PanelTable::try_new(
            vec![
                "AAPL".to_string(),
                "MSFT".to_string(),
                "AAPL".to_string(),
                "MSFT".to_string(),
            ],
            vec![day(1), day(1), day(2), day(2)],
            vec![Column::new("close", vec![100.0, 200.0, 110.0, 220.0])],
        )
        .unwrap();

        let engine = FeatureEngine::new(vec![sma(2)]).unwrap();
        let result = engine.transform(&table).unwrap();
        let values = result.column("sma_2d").unwrap();

        assert!(values[0].is_nan());
        assert!(values[1].is_nan());
        assert!((values[2] - 105.0).abs() < 1e-10);
        assert!((values[3] - 210.0).abs() < 1e-10);
    }

    #[test]
    fn test_transform_without_group_key_spans_table() {
        let table = PanelTable::try_new(
            vec!["AAPL".to_string(), "MSFT".to_string()],
            vec![day(1), day(2)],
            vec![Column::new("close", vec![100.0, 200.0])],
        )
        .unwrap();

        let feature: Arc<dyn Feature> =
            Arc::new(MovingAverage::new("close", 2, "date", None).unwrap());
        let engine = FeatureEngine::new(vec![feature]).unwrap();
        let result = engine.transform(&table).unwrap();
        let values = result.column("sma_2d").unwrap();

        assert!(values[0].is_nan());
        assert!((values[1] - 150.0).abs() < 1e-10);
    }

    #[test]
    fn test_transform_is_idempotent() {
        let table = single_asset_table();
        let engine = FeatureEngine::new(vec![
            sma(2),
            Arc::new(
                Returns::new("close", 1, "date", Some("identifier".to_string())).unwrap(),
            ),
        ])
        .unwrap();

        let once = engine.transform(&table).unwrap();
        let twice = engine.transform(&once).unwrap();

        for name in ["sma_2d", "returns_1d"] {
            let a = once.column(name).unwrap();
            let b = twice.column(name).unwrap();
            for (x, y) in a.iter().zip(b.iter()) {
                assert!(x == y || (x.is_nan() && y.is_nan()));
            }
        }
    }

    #[test]
    fn test_transform_collision_last_write_wins() {
        let table = single_asset_table()
            .with_column("open", vec![10.0, 20.0, 30.0, 40.0, 50.0])
            .unwrap();

        // Both features emit "sma_2d"; the later one (reading "open") wins.
        let close_sma = sma(2);
        let open_sma: Arc<dyn Feature> = Arc::new(
            MovingAverage::new("open", 2, "date", Some("identifier".to_string())).unwrap(),
        );
        let engine = FeatureEngine::new(vec![close_sma, open_sma]).unwrap();

        let result = engine.transform(&table).unwrap();
        let values = result.column("sma_2d").unwrap();
        assert!((values[1] - 15.0).abs() < 1e-10);
        assert!((values[4] - 45.0).abs() < 1e-10);
    }

    #[test]
    fn test_transform_missing_data_column() {
        let table = single_asset_table();
        let feature: Arc<dyn Feature> = Arc::new(
            MovingAverage::new("open", 2, "date", Some("identifier".to_string())).unwrap(),
        );
        let engine = FeatureEngine::new(vec![feature]).unwrap();

        match engine.transform(&table) {
            Err(FeatureError::ColumnNotFound(name)) => assert_eq!(name, "open"),
            other => panic!("expected ColumnNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_transform_missing_sort_column() {
        let table = single_asset_table();
        let feature: Arc<dyn Feature> = Arc::new(
            MovingAverage::new("close", 2, "timestamp", Some("identifier".to_string()))
                .unwrap(),
        );
        let engine = FeatureEngine::new(vec![feature]).unwrap();

        match engine.transform(&table) {
            Err(FeatureError::ColumnNotFound(name)) => assert_eq!(name, "timestamp"),
            other => panic!("expected ColumnNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_transform_missing_group_column() {
        let table = single_asset_table();
        let feature: Arc<dyn Feature> = Arc::new(
            MovingAverage::new("close", 2, "date", Some("ticker".to_string())).unwrap(),
        );
        let engine = FeatureEngine::new(vec![feature]).unwrap();

        match engine.transform(&table) {
            Err(FeatureError::ColumnNotFound(name)) => assert_eq!(name, "ticker"),
            other => panic!("expected ColumnNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_transform_empty_table_passes_through() {
        let table = PanelTable::try_new(
            vec![],
            vec![],
            vec![Column::new("close", vec![])],
        )
        .unwrap();
        let engine = FeatureEngine::new(vec![sma(2)]).unwrap();

        let result = engine.transform(&table).unwrap();
        assert_eq!(result.num_rows(), 0);
        assert_eq!(result.column_names(), vec!["close", "sma_2d"]);
    }
}
