//! Rolling volatility feature

use crate::error::FeatureError;
use crate::traits::Feature;

/// Rolling sample standard deviation
///
/// Trailing-window sample standard deviation (ddof = 1) of a column,
/// within a group, ordered by the sort key. The first N-1 rows of each
/// group have no defined value; a constant window yields exactly 0.
#[derive(Debug, Clone)]
pub struct Volatility {
    /// Source column.
    pub column: String,
    /// Window size in days.
    pub window_days: usize,
    /// Sort column.
    pub sort_by: String,
    /// Optional grouping column.
    pub group_by: Option<String>,
}

impl Volatility {
    /// Creates a new volatility feature.
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
            return Err(FeatureError::invalid_params(
                "volatility window must be >= 1",
            ));
        }
        Ok(Self {
            column: column.into(),
            window_days,
            sort_by: sort_by.into(),
            group_by,
        })
    }
}

impl Feature for Volatility {
    fn name(&self) -> String {
        format!("volatility_{}d", self.window_days)
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

        for i in (window - 1)..len {
            let start = i + 1 - window;
            let values = &series[start..=i];

            // Constant window: zero dispersion
            let first = values[0];
            if values.iter().all(|&v| v == first) {
                result[i] = 0.0;
                continue;
            }

            let mean = values.iter().sum::<f64>() / window as f64;
            let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
                / (window as f64 - 1.0);
            result[i] = variance.sqrt();
        }

        result
    }
}
