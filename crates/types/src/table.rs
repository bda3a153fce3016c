//! Columnar panel table.

use crate::error::TableError;
use crate::observation::Observation;

/// Canonical name of the identifier column.
pub const IDENTIFIER_COLUMN: &str = "identifier";
/// Canonical name of the date column.
pub const DATE_COLUMN: &str = "date";

/// A named numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Values, one per row. Missing values are `f64::NAN`.
    pub values: Vec<f64>,
}

impl Column {
    /// Creates a new column.
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Columnar panel data: one row per (identifier, date) pair.
///
/// The table is immutable: transformations like [`PanelTable::with_column`]
/// return a new table and never mutate the input. Rows may arrive in any
/// order; within-group date ordering is established by the computing stage,
/// not by the table itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelTable {
    identifiers: Vec<String>,
    dates_ns: Vec<i64>,
    columns: Vec<Column>,
}

impl PanelTable {
    /// Creates a table from parallel identifier/date vectors and numeric columns.
    ///
    /// # Errors
    /// - [`TableError::LengthMismatch`] when a vector length disagrees with
    ///   the identifier vector.
    /// - [`TableError::DuplicateColumn`] when two columns share a name.
    /// - [`TableError::ReservedColumn`] when a numeric column is named
    ///   `identifier` or `date`.
    pub fn try_new(
        identifiers: Vec<String>,
        dates_ns: Vec<i64>,
        columns: Vec<Column>,
    ) -> Result<Self, TableError> {
        let rows = identifiers.len();
        if dates_ns.len() != rows {
            return Err(TableError::LengthMismatch {
                column: DATE_COLUMN.to_string(),
                expected: rows,
                actual: dates_ns.len(),
            });
        }

        for (i, col) in columns.iter().enumerate() {
            if col.name == IDENTIFIER_COLUMN || col.name == DATE_COLUMN {
                return Err(TableError::ReservedColumn(col.name.clone()));
            }
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(TableError::DuplicateColumn(col.name.clone()));
            }
            if col.values.len() != rows {
                return Err(TableError::LengthMismatch {
                    column: col.name.clone(),
                    expected: rows,
                    actual: col.values.len(),
                });
            }
        }

        Ok(Self {
            identifiers,
            dates_ns,
            columns,
        })
    }

    /// Builds a table from row-oriented observations.
    ///
    /// The first observation defines the field layout; every following
    /// observation must carry the same field names in the same order.
    ///
    /// # Errors
    /// - [`TableError::FieldMismatch`] when an observation diverges from
    ///   the layout of the first one.
    /// - Any error from [`PanelTable::try_new`].
    pub fn from_observations(rows: &[Observation]) -> Result<Self, TableError> {
        let field_names: Vec<&str> = rows
            .first()
            .map(|obs| obs.values.iter().map(|(name, _)| name.as_str()).collect())
            .unwrap_or_default();

        let mut identifiers = Vec::with_capacity(rows.len());
        let mut dates_ns = Vec::with_capacity(rows.len());
        let mut columns: Vec<Column> = field_names
            .iter()
            .map(|name| Column::new(*name, Vec::with_capacity(rows.len())))
            .collect();

        for (row, obs) in rows.iter().enumerate() {
            let matches_layout = obs.values.len() == field_names.len()
                && obs
                    .values
                    .iter()
                    .zip(&field_names)
                    .all(|((name, _), expected)| name == expected);
            if !matches_layout {
                return Err(TableError::FieldMismatch { row });
            }

            identifiers.push(obs.identifier.clone());
            dates_ns.push(obs.date_ns);
            for (col, (_, value)) in columns.iter_mut().zip(&obs.values) {
                col.values.push(*value);
            }
        }

        Self::try_new(identifiers, dates_ns, columns)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.identifiers.len()
    }

    /// Returns `true` when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Name of the identifier column.
    #[must_use]
    pub fn identifier_column(&self) -> &'static str {
        IDENTIFIER_COLUMN
    }

    /// Name of the date column.
    #[must_use]
    pub fn date_column(&self) -> &'static str {
        DATE_COLUMN
    }

    /// Per-row identifiers.
    #[must_use]
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Per-row dates (UTC epoch nanoseconds).
    #[must_use]
    pub fn dates_ns(&self) -> &[i64] {
        &self.dates_ns
    }

    /// Numeric columns in stable order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Values of a numeric column by name, if present.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Returns `true` when `name` refers to any column, including the
    /// identifier and date columns.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        name == IDENTIFIER_COLUMN || name == DATE_COLUMN || self.column(name).is_some()
    }

    /// Names of the numeric columns in stable order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Returns a new table with `values` added as column `name`.
    ///
    /// An existing column with the same name is replaced in place
    /// (last write wins), keeping its position.
    ///
    /// # Errors
    /// - [`TableError::LengthMismatch`] when `values` does not have one
    ///   entry per row.
    /// - [`TableError::ReservedColumn`] for the identifier/date names.
    pub fn with_column(
        &self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, TableError> {
        let name = name.into();
        if name == IDENTIFIER_COLUMN || name == DATE_COLUMN {
            return Err(TableError::ReservedColumn(name));
        }
        if values.len() != self.num_rows() {
            return Err(TableError::LengthMismatch {
                column: name,
                expected: self.num_rows(),
                actual: values.len(),
            });
        }

        let mut table = self.clone();
        match table.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.values = values,
            None => table.columns.push(Column { name, values }),
        }
        Ok(table)
    }
}
