use thiserror::Error;

/// Errors raised while constructing or extending a panel table.
#[derive(Debug, Error)]
pub enum TableError {
    /// A column's length does not match the table's row count
    #[error("column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        /// Offending column name.
        column: String,
        /// Expected number of rows.
        expected: usize,
        /// Actual number of values supplied.
        actual: usize,
    },

    /// Two columns share the same name
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// A numeric column collides with the identifier or date column
    #[error("reserved column name: {0}")]
    ReservedColumn(String),

    /// An observation's fields diverge from the table schema
    #[error("observation at row {row} does not match the field layout of row 0")]
    FieldMismatch {
        /// Index of the offending observation.
        row: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TableError::LengthMismatch {
            column: "close".to_string(),
            expected: 5,
            actual: 3,
        };
        assert_eq!(err.to_string(), "column 'close' has 3 values, expected 5");

        let err = TableError::DuplicateColumn("close".to_string());
        assert_eq!(err.to_string(), "duplicate column: close");
    }
}
