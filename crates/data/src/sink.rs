//! Sink trait and file/composite sinks.

use std::path::PathBuf;

use crate::error::DataError;
use crate::writer::write_panel;
use factor_types::{format_date_ns, PanelTable};

/// Consumes an enriched panel table.
pub trait Sink {
    /// Exports the table.
    ///
    /// # Errors
    /// Returns a [`DataError`] when the export fails.
    fn export(&self, table: &PanelTable) -> Result<(), DataError>;
}

/// Sink writing the master table as Parquet.
pub struct ParquetSink {
    path: PathBuf,
}

impl ParquetSink {
    /// Creates a Parquet sink for the given target path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Sink for ParquetSink {
    fn export(&self, table: &PanelTable) -> Result<(), DataError> {
        write_panel(&self.path, table)?;
        tracing::info!("wrote {} rows to {}", table.num_rows(), self.path.display());
        Ok(())
    }
}

/// Sink writing the master table as CSV.
///
/// Dates are formatted `YYYY-MM-DD`; missing values are empty fields.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Creates a CSV sink for the given target path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Sink for CsvSink {
    fn export(&self, table: &PanelTable) -> Result<(), DataError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut out = String::new();
        out.push_str("identifier,date");
        for col in table.columns() {
            out.push(',');
            out.push_str(&col.name);
        }
        out.push('\n');

        for row in 0..table.num_rows() {
            out.push_str(&table.identifiers()[row]);
            out.push(',');
            out.push_str(&format_date_ns(table.dates_ns()[row]));
            for col in table.columns() {
                out.push(',');
                let value = col.values[row];
                if !value.is_nan() {
                    out.push_str(&value.to_string());
                }
            }
            out.push('\n');
        }

        std::fs::write(&self.path, out)?;
        tracing::info!("wrote {} rows to {}", table.num_rows(), self.path.display());
        Ok(())
    }
}

/// Invokes multiple sinks in a fixed, caller-specified order over the
/// same table.
///
/// Policy: aborts on the first failing sub-sink; outputs already written
/// by earlier sinks are not rolled back.
pub struct CompositeSink {
    sinks: Vec<Box<dyn Sink>>,
}

impl CompositeSink {
    /// Creates a composite over the given sinks.
    #[must_use]
    pub fn new(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self { sinks }
    }
}

impl Sink for CompositeSink {
    fn export(&self, table: &PanelTable) -> Result<(), DataError> {
        for sink in &self.sinks {
            sink.export(table)?;
        }
        Ok(())
    }
}
