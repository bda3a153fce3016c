//! Source trait and the Parquet directory source.

use std::path::{Path, PathBuf};

use crate::error::DataError;
use crate::loader::{filter_by_date_range, load_history, History};
use crate::validation::validate_history;
use factor_types::{Column, PanelTable};

/// Inclusive date range in UTC epoch nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Inclusive start.
    pub start_ns: i64,
    /// Inclusive end.
    pub end_ns: i64,
}

/// Supplies raw panel rows for a set of identifiers.
///
/// Per-identifier failures are the source's concern: a conforming
/// implementation skips failing identifiers and only escalates when no
/// identifier at all produced rows.
pub trait Source {
    /// Fetches the combined panel table.
    ///
    /// # Errors
    /// Returns [`DataError::EmptyData`] when zero identifiers succeed;
    /// other variants for total failures.
    fn fetch(&self) -> Result<PanelTable, DataError>;
}

/// Resolve the panel data root from the `FACTOR_DATA_ROOT` env override
/// or the canonical default.
#[must_use]
pub fn resolve_data_root() -> PathBuf {
    let root = std::env::var("FACTOR_DATA_ROOT").unwrap_or_else(|_| "data/panel".to_string());
    PathBuf::from(root)
}

/// Source reading one Parquet history file per identifier from a
/// directory (`<root>/<identifier>.parquet`).
///
/// Identifiers whose file is missing, unreadable, schema-divergent, or
/// empty after date filtering are logged and skipped; the fetch fails
/// only when nothing at all was loaded.
pub struct ParquetSource {
    root: PathBuf,
    identifiers: Vec<String>,
    range: Option<DateRange>,
}

impl ParquetSource {
    /// Creates a source over a data root and identifier list.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, identifiers: Vec<String>) -> Self {
        Self {
            root: root.into(),
            identifiers,
            range: None,
        }
    }

    /// Restricts the fetch to an inclusive date range.
    #[must_use]
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Path of one identifier's history file.
    #[must_use]
    pub fn identifier_path(&self, identifier: &str) -> PathBuf {
        self.root.join(format!("{identifier}.parquet"))
    }

    fn load_identifier(&self, identifier: &str, path: &Path) -> Result<History, DataError> {
        let history = load_history(path)?;
        let history = match self.range {
            Some(range) => filter_by_date_range(&history, range),
            None => history,
        };
        validate_history(&history)?;
        tracing::debug!("fetched {identifier}: {} rows", history.num_rows());
        Ok(history)
    }
}

impl Source for ParquetSource {
    fn fetch(&self) -> Result<PanelTable, DataError> {
        tracing::info!(
            "fetching panel data for {} identifiers from {}",
            self.identifiers.len(),
            self.root.display()
        );

        let mut identifiers: Vec<String> = Vec::new();
        let mut dates_ns: Vec<i64> = Vec::new();
        let mut columns: Vec<Column> = Vec::new();
        let mut loaded = 0usize;

        for identifier in &self.identifiers {
            let path = self.identifier_path(identifier);
            let history = match self.load_identifier(identifier, &path) {
                Ok(history) => history,
                Err(err) => {
                    tracing::warn!("skipping {identifier}: {err}");
                    continue;
                }
            };

            // The first loaded identifier defines the column layout.
            if loaded == 0 {
                columns = history
                    .columns
                    .iter()
                    .map(|c| Column::new(c.name.clone(), Vec::new()))
                    .collect();
            } else if history.column_names() != columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
            {
                tracing::warn!("skipping {identifier}: column layout diverges");
                continue;
            }

            identifiers.extend(std::iter::repeat(identifier.clone()).take(history.num_rows()));
            dates_ns.extend_from_slice(&history.dates_ns);
            for (col, loaded_col) in columns.iter_mut().zip(&history.columns) {
                col.values.extend_from_slice(&loaded_col.values);
            }
            loaded += 1;
        }

        if loaded == 0 {
            return Err(DataError::EmptyData);
        }

        tracing::info!("combined {} rows from {} identifiers", dates_ns.len(), loaded);

        PanelTable::try_new(identifiers, dates_ns, columns)
            .map_err(|e| DataError::CorruptData(e.to_string()))
    }
}
