//! Simple Moving Average (SMA) feature

use crate::error::FeatureError;
use crate::traits::Feature;

/// Simple Moving Average
///
/// Arithmetic mean of the last N values of a column, within a group,
/// ordered by the sort key. The first N-1 rows of each group have no
/// defined value.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    /// Source column.
    pub column: String,
    /// Window size in days.
    pub window_days: usize,
    /// Sort column.
    pub sort_by: String,
    /// Optional grouping column.
    pub group_by: Option<String>,
}

impl MovingAverage {
    /// Creates a new SMA feature.
    ///
    /// # Errors
    /// Returns [`FeatureError::InvalidParams`] when `window_days` is 0.
    pub fn new(
        column: impl Into<String>,
        window_days: usize,
        sort_by: impl Into<String>,
        group_by: Option<String>,
    ) -> Result<Self, FeatureError> {
        if window_days == 0 {
            return Err(FeatureError::invalid_params("sma window must be >= 1"));
        }
        Ok(Self {
            column: column.into(),
            window_days,
            sort_by: sort_by.into(),
            group_by,
        })
    }
}

impl Feature for MovingAverage {
    fn name(&self) -> String {
        format!("sma_{}d", self.window_days)
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
        let window = self.window_days;
        let mut result = vec![f64::NAN; len];

        if len < window {
            return result;
        }

        // Initial sum, then rolling update
        let mut sum: f64 = series[..window].iter().sum();
        result[window - 1] = sum / window as f64;

        for i in window..len {
            sum += series[i] - series[i - window];
            result[i] = sum / window as f64;
        }

        result
    }
}
