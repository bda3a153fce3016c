//! Parquet loading and date-range filters.

use std::path::Path;

use arrow::array::{Array, Float64Array, StringArray, TimestampNanosecondArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::DataError;
use crate::source::DateRange;
use factor_types::{Column, PanelTable};

/// Raw date-keyed history for one identifier, as loaded from disk.
///
/// Rows are kept in file order; sorting is the computing stage's
/// responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    /// Per-row dates (UTC epoch nanoseconds).
    pub dates_ns: Vec<i64>,
    /// Numeric columns, one value per row. Nulls are loaded as NaN.
    pub columns: Vec<Column>,
}

impl History {
    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.dates_ns.len()
    }

    /// Returns `true` when the history has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates_ns.is_empty()
    }

    /// Names of the numeric columns in file order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Loads one identifier's history from a Parquet file with schema:
/// `date` (timestamp ns, UTC) plus any number of Float64 columns.
///
/// # Errors
/// - [`DataError::FileNotFound`] when the file cannot be opened.
/// - [`DataError::ParseError`] on Parquet decoding failures.
/// - [`DataError::MissingColumn`] / [`DataError::InvalidColumnType`]
///   when the schema does not match the contract.
/// - [`DataError::EmptyData`] when the file holds no rows.
pub fn load_history(path: &Path) -> Result<History, DataError> {
    let file = std::fs::File::open(path)
        .map_err(|e| DataError::FileNotFound(path.display().to_string(), e.to_string()))?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DataError::ParseError(e.to_string()))?;
    let reader = builder
        .build()
        .map_err(|e| DataError::ParseError(e.to_string()))?;

    let mut dates_ns = Vec::new();
    let mut columns: Vec<Column> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.map_err(|e| DataError::ParseError(e.to_string()))?;

        if columns.is_empty() {
            for field in batch.schema().fields() {
                if field.name() == "date" {
                    continue;
                }
                if *field.data_type() != DataType::Float64 {
                    return Err(DataError::InvalidColumnType(field.name().clone()));
                }
                columns.push(Column::new(field.name().clone(), Vec::new()));
            }
        }

        let ts_arr = timestamp_column(&batch, "date")?;
        for row in 0..batch.num_rows() {
            dates_ns.push(ts_arr.value(row));
        }

        for col in &mut columns {
            let arr = numeric_f64_column(&batch, &col.name)?;
            for row in 0..batch.num_rows() {
                let value = if arr.is_null(row) {
                    f64::NAN
                } else {
                    arr.value(row)
                };
                col.values.push(value);
            }
        }
    }

    if dates_ns.is_empty() {
        return Err(DataError::EmptyData);
    }

    Ok(History { dates_ns, columns })
}

/// Loads a full master table from Parquet: `identifier` (utf8),
/// `date` (timestamp ns, UTC), plus Float64 columns.
///
/// # Errors
/// Same error surface as [`load_history`], plus
/// [`DataError::CorruptData`] when the loaded columns cannot form a
/// consistent table.
pub fn load_panel(path: &Path) -> Result<PanelTable, DataError> {
    let file = std::fs::File::open(path)
        .map_err(|e| DataError::FileNotFound(path.display().to_string(), e.to_string()))?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DataError::ParseError(e.to_string()))?;
    let reader = builder
        .build()
        .map_err(|e| DataError::ParseError(e.to_string()))?;

    let mut identifiers = Vec::new();
    let mut dates_ns = Vec::new();
    let mut columns: Vec<Column> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.map_err(|e| DataError::ParseError(e.to_string()))?;

        if columns.is_empty() {
            for field in batch.schema().fields() {
                if field.name() == "identifier" || field.name() == "date" {
                    continue;
                }
                if *field.data_type() != DataType::Float64 {
                    return Err(DataError::InvalidColumnType(field.name().clone()));
                }
                columns.push(Column::new(field.name().clone(), Vec::new()));
            }
        }

        let id_col = batch
            .column_by_name("identifier")
            .ok_or_else(|| DataError::MissingColumn("identifier".to_string()))?;
        let id_arr = id_col
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| DataError::InvalidColumnType("identifier".to_string()))?;
        let ts_arr = timestamp_column(&batch, "date")?;

        for row in 0..batch.num_rows() {
            identifiers.push(id_arr.value(row).to_string());
            dates_ns.push(ts_arr.value(row));
        }

        for col in &mut columns {
            let arr = numeric_f64_column(&batch, &col.name)?;
            for row in 0..batch.num_rows() {
                let value = if arr.is_null(row) {
                    f64::NAN
                } else {
                    arr.value(row)
                };
                col.values.push(value);
            }
        }
    }

    if identifiers.is_empty() {
        return Err(DataError::EmptyData);
    }

    PanelTable::try_new(identifiers, dates_ns, columns)
        .map_err(|e| DataError::CorruptData(e.to_string()))
}

/// Returns a new history containing only rows with dates inside the
/// inclusive range.
#[must_use]
pub fn filter_by_date_range(history: &History, range: DateRange) -> History {
    let keep: Vec<usize> = history
        .dates_ns
        .iter()
        .enumerate()
        .filter(|(_, &d)| d >= range.start_ns && d <= range.end_ns)
        .map(|(i, _)| i)
        .collect();

    History {
        dates_ns: keep.iter().map(|&i| history.dates_ns[i]).collect(),
        columns: history
            .columns
            .iter()
            .map(|col| {
                Column::new(
                    col.name.clone(),
                    keep.iter().map(|&i| col.values[i]).collect(),
                )
            })
            .collect(),
    }
}

fn timestamp_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a TimestampNanosecondArray, DataError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;
    col.as_any()
        .downcast_ref::<TimestampNanosecondArray>()
        .ok_or_else(|| DataError::InvalidColumnType(name.to_string()))
}

fn numeric_f64_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Float64Array, DataError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| DataError::MissingColumn(name.to_string()))?;
    col.as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| DataError::InvalidColumnType(name.to_string()))
}
