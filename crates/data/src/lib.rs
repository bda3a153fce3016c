//! Factor Data
//!
//! Parquet panel sources and sinks, master-table persistence, and
//! panel validation.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Data-layer error types.
pub mod error;
/// Parquet loading and date-range filters.
pub mod loader;
/// Sink trait and file/composite sinks.
pub mod sink;
/// Source trait and the Parquet directory source.
pub mod source;
/// Panel validation helpers.
pub mod validation;
/// Master-table Parquet writing.
pub mod writer;

/// Re-export: data-layer error type.
pub use error::DataError;
/// Re-export: raw per-identifier history container.
pub use loader::History;
/// Re-export: date-range filter for histories.
pub use loader::filter_by_date_range;
/// Re-export: load a per-identifier history from Parquet.
pub use loader::load_history;
/// Re-export: load a full master table from Parquet.
pub use loader::load_panel;
/// Re-export: composite sink (abort-on-first-failure policy).
pub use sink::CompositeSink;
/// Re-export: CSV master-table sink.
pub use sink::CsvSink;
/// Re-export: Parquet master-table sink.
pub use sink::ParquetSink;
/// Re-export: sink contract.
pub use sink::Sink;
/// Re-export: inclusive date range.
pub use source::DateRange;
/// Re-export: Parquet directory source.
pub use source::ParquetSource;
/// Re-export: source contract.
pub use source::Source;
/// Re-export: panel data root resolution.
pub use source::resolve_data_root;
/// Re-export: per-identifier history validation.
pub use validation::validate_history;
/// Re-export: panel validation.
pub use validation::validate_panel;
/// Re-export: master-table Parquet writer.
pub use writer::write_panel;
