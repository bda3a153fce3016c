//! Panel validation helpers.

use std::collections::HashSet;

use crate::error::DataError;
use crate::loader::History;
use factor_types::PanelTable;

/// Validates one identifier's freshly loaded history.
///
/// # Errors
/// - [`DataError::EmptyData`] when the history has no rows.
/// - [`DataError::CorruptData`] for duplicate dates or non-finite
///   values.
pub fn validate_history(history: &History) -> Result<(), DataError> {
    if history.is_empty() {
        return Err(DataError::EmptyData);
    }

    let mut seen: HashSet<i64> = HashSet::with_capacity(history.num_rows());
    for (row, &date_ns) in history.dates_ns.iter().enumerate() {
        if !seen.insert(date_ns) {
            return Err(DataError::CorruptData(format!(
                "Duplicate date at row {row}: {date_ns}"
            )));
        }
    }

    for col in &history.columns {
        for (row, value) in col.values.iter().enumerate() {
            if !value.is_finite() {
                return Err(DataError::CorruptData(format!(
                    "NaN/Inf in column '{}' at row {row}",
                    col.name
                )));
            }
        }
    }

    Ok(())
}

/// Validates a freshly fetched panel table.
///
/// Enriched tables carry NaN warmup values and must not be re-validated
/// with this function; it is for source output, where every value is
/// expected to be present and finite.
///
/// # Errors
/// - [`DataError::EmptyData`] when the table has no rows.
/// - [`DataError::CorruptData`] for empty identifiers, non-finite
///   values, or duplicate (identifier, date) pairs.
pub fn validate_panel(table: &PanelTable) -> Result<(), DataError> {
    if table.is_empty() {
        return Err(DataError::EmptyData);
    }

    let mut seen: HashSet<(&str, i64)> = HashSet::with_capacity(table.num_rows());

    for (row, (identifier, &date_ns)) in table
        .identifiers()
        .iter()
        .zip(table.dates_ns())
        .enumerate()
    {
        if identifier.trim().is_empty() {
            return Err(DataError::CorruptData(format!(
                "Empty identifier at row {row}"
            )));
        }

        if !seen.insert((identifier.as_str(), date_ns)) {
            return Err(DataError::CorruptData(format!(
                "Duplicate date for {identifier} at row {row}: {date_ns}"
            )));
        }
    }

    for col in table.columns() {
        for (row, value) in col.values.iter().enumerate() {
            if !value.is_finite() {
                return Err(DataError::CorruptData(format!(
                    "NaN/Inf in column '{}' at row {row}",
                    col.name
                )));
            }
        }
    }

    Ok(())
}
