/// One panel row: an identifier, a calendar date, and named numeric fields.
///
/// Observations are the row-oriented building input for [`crate::PanelTable`];
/// all computation happens on the columnar table, not on rows.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Observation {
    /// Asset identifier (e.g. a ticker symbol). Must be non-empty.
    pub identifier: String,
    /// Observation date as UTC epoch nanoseconds (midnight-aligned).
    pub date_ns: i64,
    /// Named numeric fields (e.g. `("close", 101.5)`).
    pub values: Vec<(String, f64)>,
}

impl Observation {
    /// Creates a new observation.
    #[must_use]
    pub fn new(identifier: impl Into<String>, date_ns: i64, values: Vec<(String, f64)>) -> Self {
        Self {
            identifier: identifier.into(),
            date_ns,
            values,
        }
    }
}
