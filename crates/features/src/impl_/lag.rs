//! Lag (shift) feature

use crate::error::FeatureError;
use crate::traits::Feature;

/// Value shifted back by N days
///
/// `value[i - n]`, within a group, ordered by the sort key. The first
/// N rows of each group have no defined value.
#[derive(Debug, Clone)]
pub struct Lag {
    /// Source column.
    pub column: String,
    /// Shift offset in days.
    pub n_days: usize,
    /// Sort column.
    pub sort_by: String,
    /// Optional grouping column.
    pub group_by: Option<String>,
}

impl Lag {
    /// Creates a new lag feature.
    ///
    /// # Errors
    /// Returns [`FeatureError::InvalidParams`] when `n_days` is 0.
    pub fn new(
        column: impl Into<String>,
        n_days: usize,
        sort_by: impl Into<String>,
        group_by: Option<String>,
    ) -> Result<Self, FeatureError> {
        if n_days == 0 {
            return Err(FeatureError::invalid_params("lag offset must be >= 1"));
        }
        Ok(Self {
            column: column.into(),
            n_days,
            sort_by: sort_by.into(),
            group_by,
        })
    }
}

impl Feature for Lag {
    fn name(&self) -> String {
        format!("lag_{}d", self.n_days)
    }

    fn input_column(&self) -> &str {
        &self.column
    }

    fn sort_key(&self) -> &str {
        &self.sort_by
    }

    fn group_key(&self) -> Option<&str> {
        self.group_by.as_deref()
    }

    fn compute(&self, series: &[f64]) -> Vec<f64> {
        let len = series.len();
        let n = self.n_days;
        let mut result = vec![f64::NAN; len];

        for i in n..len {
            result[i] = series[i - n];
        }

        result
    }
}
