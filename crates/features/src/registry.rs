//! Feature registry for dynamic feature creation.

use crate::error::FeatureError;
use crate::impl_::{
    lag::Lag, moving_average::MovingAverage, returns::Returns,
    rsi::RelativeStrengthIndex, volatility::Volatility,
};
use crate::traits::{Feature, FeatureSpec};
use std::collections::HashMap;
use std::sync::Arc;

/// Factory function type for creating features from a specification.
pub type FeatureFactory =
    Box<dyn Fn(&FeatureSpec) -> Result<Arc<dyn Feature>, FeatureError> + Send + Sync>;

/// Registry for feature factories.
///
/// Allows dynamic creation of features by kind, which is how the
/// pipeline config turns into a feature engine. Kinds are matched
/// case-insensitively.
pub struct FeatureRegistry {
    /// Feature factories by kind.
    factories: HashMap<String, FeatureFactory>,
}

impl FeatureRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a feature factory under a kind.
    pub fn register<F>(&mut self, kind: &str, factory: F)
    where
        F: Fn(&FeatureSpec) -> Result<Arc<dyn Feature>, FeatureError> + Send + Sync + 'static,
    {
        self.factories.insert(kind.to_lowercase(), Box::new(factory));
    }

    /// Creates a feature from a specification.
    ///
    /// # Errors
    /// Returns [`FeatureError::UnknownFeature`] if the kind is not
    /// registered and [`FeatureError::InvalidParams`] when the spec's
    /// parameters are structurally invalid.
    pub fn create(&self, spec: &FeatureSpec) -> Result<Arc<dyn Feature>, FeatureError> {
        let factory = self
            .factories
            .get(&spec.kind.to_lowercase())
            .ok_or_else(|| FeatureError::UnknownFeature(spec.kind.clone()))?;
        factory(spec)
    }

    /// Checks if a kind is registered.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(&kind.to_lowercase())
    }

    /// Returns the registered kinds.
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Creates a registry with all built-in features pre-registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register("sma", |spec| {
            Ok(Arc::new(MovingAverage::new(
                spec.column.clone(),
                spec.period,
                spec.sort_by.clone(),
                spec.group_by.clone(),
            )?))
        });

        registry.register("returns", |spec| {
            Ok(Arc::new(Returns::new(
                spec.column.clone(),
                spec.period,
                spec.sort_by.clone(),
                spec.group_by.clone(),
            )?))
        });

        registry.register("volatility", |spec| {
            Ok(Arc::new(Volatility::new(
                spec.column.clone(),
                spec.period,
                spec.sort_by.clone(),
                spec.group_by.clone(),
            )?))
        });

        registry.register("lag", |spec| {
            Ok(Arc::new(Lag::new(
                spec.column.clone(),
                spec.period,
                spec.sort_by.clone(),
                spec.group_by.clone(),
            )?))
        });

        registry.register("rsi", |spec| {
            Ok(Arc::new(RelativeStrengthIndex::new(
                spec.column.clone(),
                spec.period,
                spec.sort_by.clone(),
                spec.group_by.clone(),
            )?))
        });

        registry
    }
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
