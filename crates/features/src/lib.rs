//! Factor Features
//!
//! Feature computation engine for panel data: windowed and grouped
//! transformation kernels composed and executed as one batch.
//!
//! # Features
//! - `Feature` trait with per-group vectorized kernels
//! - Batch engine sharing one group/sort pass across all features
//! - Registry for feature factories (config-driven construction)
//!
//! # Available Features
//! - `sma`: simple moving average over a trailing window
//! - `returns`: percentage change over an offset
//! - `volatility`: trailing sample standard deviation
//! - `lag`: value shifted back by an offset
//! - `rsi`: relative strength index (trailing-mean variant)

pub mod engine;
pub mod error;
pub mod impl_;
pub mod registry;
pub mod traits;

// Re-export main types
pub use engine::FeatureEngine;
pub use error::FeatureError;
pub use registry::FeatureRegistry;
pub use traits::{Feature, FeatureSpec};

// Re-export feature implementations
pub use impl_::{
    lag::Lag, moving_average::MovingAverage, returns::Returns,
    rsi::RelativeStrengthIndex, volatility::Volatility,
};
