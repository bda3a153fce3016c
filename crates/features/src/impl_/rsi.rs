//! Relative Strength Index (RSI) feature
//!
//! RSI is a bounded (0-100) momentum oscillator derived from the ratio
//! of average gains to average losses over a trailing window:
//!
//! ```text
//! RS  = avg_gain / avg_loss
//! RSI = 100 - 100 / (1 + RS)
//! ```
//!
//! This implementation uses the trailing-window simple mean of gains and
//! losses (Cutler's variant), not Wilder smoothing, so the output at any
//! row depends only on the last `window + 1` values.

use crate::error::FeatureError;
use crate::traits::Feature;

/// Relative Strength Index over a trailing window
///
/// Per-row deltas are split into gains and losses; both are averaged
/// over the trailing window within a group, ordered by the sort key.
/// The first N rows of each group have no defined value (one delta per
/// window element). With zero average loss the output saturates at 100;
/// a fully flat window reads as neutral momentum, 50.
#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex {
    /// Source column.
    pub column: String,
    /// Window size in days.
    pub window_days: usize,
    /// Sort column.
    pub sort_by: String,
    /// Optional grouping column.
    pub group_by: Option<String>,
}

impl RelativeStrengthIndex {
    /// Conventional default window.
    pub const DEFAULT_WINDOW: usize = 14;

    /// Creates a new RSI feature.
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
            return Err(FeatureError::invalid_params("rsi window must be >= 1"));
        }
        Ok(Self {
            column: column.into(),
            window_days,
            sort_by: sort_by.into(),
            group_by,
        })
    }

    /// Creates an RSI feature with the conventional 14-day window.
    #[must_use]
    pub fn with_default_window(
        column: impl Into<String>,
        sort_by: impl Into<String>,
        group_by: Option<String>,
    ) -> Self {
        Self {
            column: column.into(),
            window_days: Self::DEFAULT_WINDOW,
            sort_by: sort_by.into(),
            group_by,
        }
    }
}

impl Feature for RelativeStrengthIndex {
    fn name(&self) -> String {
        format!("rsi_{}d", self.window_days)
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

        if len <= window {
            return result;
        }

        // delta[j] = series[j + 1] - series[j]
        let mut gains = vec![0.0; len - 1];
        let mut losses = vec![0.0; len - 1];
        for i in 1..len {
            let delta = series[i] - series[i - 1];
            if delta > 0.0 {
                gains[i - 1] = delta;
            } else {
                losses[i - 1] = -delta;
            }
        }

        // Row i uses the window deltas ending at i: gains[i - window .. i]
        for i in window..len {
            let start = i - window;
            let avg_gain = gains[start..i].iter().sum::<f64>() / window as f64;
            let avg_loss = losses[start..i].iter().sum::<f64>() / window as f64;
            result[i] = rsi_value(avg_gain, avg_loss);
        }

        result
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            50.0 // flat window, neutral momentum
        } else {
            100.0 // only gains, saturated
        }
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}
