//! Core configuration structure for the Surface Dice metric.

use burn::prelude::*;
use burn_surface_ops::DistanceMetric;

use super::enums::MetricReduction;
use crate::error::{SurfaceDiceError, SurfaceDiceResult};
use crate::metrics::SurfaceDiceMetric;

/// Configuration for [`SurfaceDiceMetric`].
#[derive(Config, Debug)]
pub struct SurfaceDiceMetricConfig {
    /// Acceptable boundary deviation per class channel, in spacing units.
    /// Aligned with the class axis after background filtering.
    pub class_thresholds: Vec<f64>,
    /// Keep class channel 0 instead of treating it as background.
    #[config(default = false)]
    pub include_background: bool,
    /// Metric used for boundary distances.
    #[config(default = "DistanceMetric::Euclidean")]
    pub distance_metric: DistanceMetric,
    /// Default reduction applied by `aggregate`.
    #[config(default = "MetricReduction::Mean")]
    pub reduction: MetricReduction,
    /// Make `aggregate` also return the count of non-NaN entries.
    #[config(default = false)]
    pub get_not_nans: bool,
}

impl SurfaceDiceMetricConfig {
    /// Builds the metric with an empty buffer.
    pub fn init<B: Backend>(&self) -> SurfaceDiceMetric<B> {
        SurfaceDiceMetric::new(
            self.class_thresholds.clone(),
            self.include_background,
            self.distance_metric,
            self.reduction,
            self.get_not_nans,
        )
    }

    /// Checks the thresholds up front. The same checks run on every `update`.
    pub fn validate(&self) -> SurfaceDiceResult<()> {
        validate_thresholds(&self.class_thresholds)
    }
}

/// Every threshold must be finite and non-negative.
pub(crate) fn validate_thresholds(class_thresholds: &[f64]) -> SurfaceDiceResult<()> {
    if let Some((class, &value)) = class_thresholds
        .iter()
        .enumerate()
        .find(|(_, t)| !t.is_finite())
    {
        return Err(SurfaceDiceError::NonFiniteThreshold { class, value });
    }
    if let Some((class, &value)) = class_thresholds
        .iter()
        .enumerate()
        .find(|(_, &t)| t < 0.0)
    {
        return Err(SurfaceDiceError::NegativeThreshold { class, value });
    }
    Ok(())
}
