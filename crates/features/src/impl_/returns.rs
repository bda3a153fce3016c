//! Percentage-change (returns) feature

use crate::error::FeatureError;
use crate::traits::Feature;

/// Percentage change over N days
///
/// `value[i] / value[i - n] - 1`, within a group, ordered by the sort
/// key. The first N rows of each group have no defined value; a zero
/// divisor also yields an undefined row rather than an error.
#[derive(Debug, Clone)]
pub struct Returns {
    /// Source column.
    pub column: String,
    /// Lookback offset in days.
    pub n_days: usize,
    /// Sort column.
    pub sort_by: String,
    /// Optional grouping column.
    pub group_by: Option<String>,
}

impl Returns {
    /// Creates a new returns feature.
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
            return Err(FeatureError::invalid_params("returns offset must be >= 1"));
        }
        Ok(Self {
            column: column.into(),
            n_days,
            sort_by: sort_by.into(),
            group_by,
        })
    }
}

impl Feature for Returns {
    fn name(&self) -> String {
        format!("returns_{}d", self.n_days)
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
            let current = series[i];
            let previous = series[i - n];

            if current.is_finite() && previous.is_finite() && previous != 0.0 {
                result[i] = current / previous - 1.0;
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn returns(n: usize) -> Returns {
        Returns::new("close", n, "date", None).unwrap()
    }

    #[test]
    fn test_returns_name() {
        assert_eq!(returns(1).name(), "returns_1d");
        assert_eq!(returns(5).name(), "returns_5d");
    }

    #[test]
    fn test_returns_rejects_zero_offset() {
        let err = Returns::new("close", 0, "date", None).unwrap_err();
        assert!(matches!(err, FeatureError::InvalidParams(_)));
    }

    #[test]
    fn test_returns_one_day() {
        let series = [100.0, 110.0, 121.0, 110.0, 100.0];
        let result = returns(1).compute(&series);

        assert!(result[0].is_nan());
        assert!((result[1] - 0.1).abs() < 1e-6);
        assert!((result[2] - 0.1).abs() < 1e-6);
        assert!((result[3] - (-0.0909)).abs() < 1e-3);
        assert!((result[4] - (-0.0909)).abs() < 1e-3);
    }

    #[test]
    fn test_returns_two_day() {
        let series = [100.0, 110.0, 120.0];
        let result = returns(2).compute(&series);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!((result[2] - 0.2).abs() < 1e-10);
    }

    #[test]
    fn test_returns_zero_divisor() {
        let series = [0.0, 100.0, 200.0];
        let result = returns(1).compute(&series);

        assert!(result[1].is_nan());
        assert!((result[2] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_returns_insufficient_data() {
        let result = returns(5).compute(&[1.0, 2.0]);
        assert!(result.iter().all(|v| v.is_nan()));
    }
}
