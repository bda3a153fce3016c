//! Feature implementations
//!
//! Contains all concrete feature implementations.

pub mod lag;
pub mod moving_average;
pub mod returns;
pub mod rsi;
pub mod volatility;
