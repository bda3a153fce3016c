//! Feature trait and specifications.
//!
//! Defines the core trait and the config record for feature instances.

/// Specification for one feature instance, as it appears in pipeline
/// configuration. Constructed once, immutable, reusable across runs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FeatureSpec {
    /// Feature kind (e.g. `"sma"`, `"returns"`). Case-insensitive.
    pub kind: String,
    /// Source column to read.
    pub column: String,
    /// Window size or offset in days. Must be >= 1.
    pub period: usize,
    /// Column establishing temporal order (the date column).
    pub sort_by: String,
    /// Optional column partitioning rows into independent groups
    /// (the identifier column). `None` treats the table as one group.
    #[serde(default)]
    pub group_by: Option<String>,
}

impl FeatureSpec {
    /// Creates a new feature specification.
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        column: impl Into<String>,
        period: usize,
        sort_by: impl Into<String>,
        group_by: Option<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            column: column.into(),
            period,
            sort_by: sort_by.into(),
            group_by,
        }
    }
}

/// Trait for features: one derived column per instance.
///
/// A feature is a pure column expression. `compute` receives one group's
/// source-column values already in sort order and returns a vector of the
/// same length; rows without sufficient history are `f64::NAN`. The engine
/// owns grouping, ordering, and scattering results back to row positions,
/// so kernels never see the table itself.
pub trait Feature: Send + Sync + std::fmt::Debug {
    /// Output column name, derived deterministically from the
    /// construction parameters (e.g. `sma_21d`).
    fn name(&self) -> String;

    /// Source column this feature reads.
    fn input_column(&self) -> &str;

    /// Column establishing the temporal order.
    fn sort_key(&self) -> &str;

    /// Optional grouping column.
    fn group_key(&self) -> Option<&str>;

    /// Computes the derived series for one ordered group.
    ///
    /// Returns a vector with the same length as `series`. Values at rows
    /// with insufficient history are `f64::NAN`.
    fn compute(&self, series: &[f64]) -> Vec<f64>;
}
