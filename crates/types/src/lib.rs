//! Factor Types
//!
//! Core data structures for the Factor panel feature engine.
//! This crate provides the observation/table data model shared by the
//! feature, data, and pipeline crates, plus calendar-date helpers.

#![deny(clippy::all)]

pub mod date;
pub mod error;
pub mod observation;
pub mod table;

// Re-export main types for convenience
pub use date::{format_date_ns, parse_date_ns, ParseDateError, NANOS_PER_DAY};
pub use error::TableError;
pub use observation::Observation;
pub use table::{Column, PanelTable, DATE_COLUMN, IDENTIFIER_COLUMN};
