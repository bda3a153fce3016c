//! Master-table Parquet writing.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, TimestampNanosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_writer::ArrowWriter;

use crate::error::DataError;
use factor_types::PanelTable;

/// Writes a panel table as a Parquet master table.
///
/// Layout: `identifier` (utf8), `date` (timestamp ns, UTC), one nullable
/// Float64 column per numeric column in stable order. NaN values are
/// stored as nulls so downstream readers see proper missing values.
/// Parent directories are created as needed.
///
/// # Errors
/// - [`DataError::Io`] when the target file cannot be created.
/// - [`DataError::WriteError`] when Arrow/Parquet writing fails.
pub fn write_panel(path: &Path, table: &PanelTable) -> Result<(), DataError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut fields = vec![
        Field::new("identifier", DataType::Utf8, false),
        Field::new(
            "date",
            DataType::Timestamp(TimeUnit::Nanosecond, Some("UTC".into())),
            false,
        ),
    ];
    for col in table.columns() {
        fields.push(Field::new(&col.name, DataType::Float64, true));
    }

    let identifiers: Vec<&str> = table.identifiers().iter().map(String::as_str).collect();
    let mut arrays: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(identifiers)),
        Arc::new(
            TimestampNanosecondArray::from(table.dates_ns().to_vec()).with_timezone("UTC"),
        ),
    ];
    for col in table.columns() {
        let values: Vec<Option<f64>> = col
            .values
            .iter()
            .map(|&v| if v.is_nan() { None } else { Some(v) })
            .collect();
        arrays.push(Arc::new(Float64Array::from(values)));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays)
        .map_err(|e| DataError::WriteError(e.to_string()))?;

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)
        .map_err(|e| DataError::WriteError(e.to_string()))?;
    writer
        .write(&batch)
        .map_err(|e| DataError::WriteError(e.to_string()))?;
    writer
        .close()
        .map(|_| ())
        .map_err(|e| DataError::WriteError(e.to_string()))
}
