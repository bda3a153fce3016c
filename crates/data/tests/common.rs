use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, TimestampNanosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_writer::ArrowWriter;

use factor_types::NANOS_PER_DAY;

pub fn day(n: i64) -> i64 {
    n * NANOS_PER_DAY
}

pub fn write_history_parquet(
    path: &Path,
    dates_ns: &[i64],
    columns: &[(&str, Vec<f64>)],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut fields = vec![Field::new(
        "date",
        DataType::Timestamp(TimeUnit::Nanosecond, Some("UTC".into())),
        false,
    )];
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(
        TimestampNanosecondArray::from(dates_ns.to_vec()).with_timezone("UTC"),
    )];

    for (name, values) in columns {
        fields.push(Field::new(*name, DataType::Float64, false));
        arrays.push(Arc::new(Float64Array::from(values.clone())));
    }

    write_custom_parquet(path, fields, arrays)
}

pub fn write_custom_parquet(
    path: &Path,
    fields: Vec<Field>,
    columns: Vec<ArrayRef>,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close().map(|_| ()).map_err(|e| e.into())
}

pub fn string_column(values: &[&str]) -> ArrayRef {
    Arc::new(StringArray::from(values.to_vec())) as ArrayRef
}
