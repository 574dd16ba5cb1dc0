//! Cumulative Surface Dice metric.
//!
//! Accumulates one `[batch, class]` result per `update` and reduces the
//! concatenated buffer on `aggregate`.

use burn::prelude::*;
use burn::tensor::BasicOps;
use burn_surface_ops::{DistanceMetric, SpacingSpec};

use super::reduction::{do_metric_reduction, MetricTensor};
use super::surface_dice::{compute_surface_dice, EmptyBoundary};
use crate::config::MetricReduction;
use crate::error::{SurfaceDiceError, SurfaceDiceResult};

/// Lifecycle of the accumulation buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricState {
    /// No result buffered (initial, or after `reset`).
    Empty,
    /// At least one successful `update` since the last `reset`.
    Accumulating,
}

/// Output of [`SurfaceDiceMetric::aggregate`].
#[derive(Debug, Clone)]
pub enum Aggregate<B: Backend> {
    /// The reduced value alone (`get_not_nans = false`).
    Value(MetricTensor<B>),
    /// The reduced value and its non-NaN counts (`get_not_nans = true`).
    WithNotNans {
        value: MetricTensor<B>,
        not_nans: MetricTensor<B>,
    },
}

impl<B: Backend> Aggregate<B> {
    pub const fn value(&self) -> &MetricTensor<B> {
        match self {
            Self::Value(value) | Self::WithNotNans { value, .. } => value,
        }
    }

    pub fn into_value(self) -> MetricTensor<B> {
        match self {
            Self::Value(value) | Self::WithNotNans { value, .. } => value,
        }
    }

    pub const fn not_nans(&self) -> Option<&MetricTensor<B>> {
        match self {
            Self::Value(_) => None,
            Self::WithNotNans { not_nans, .. } => Some(not_nans),
        }
    }
}

/// Normalized Surface Distance metric accumulated over batches.
///
/// Not internally synchronized: share it across threads behind a lock.
#[derive(Debug, Clone)]
pub struct SurfaceDiceMetric<B: Backend> {
    class_thresholds: Vec<f64>,
    include_background: bool,
    distance_metric: DistanceMetric,
    reduction: MetricReduction,
    get_not_nans: bool,
    buffer: Vec<Tensor<B, 2>>,
    last_diagnostics: Vec<EmptyBoundary>,
}

impl<B: Backend> SurfaceDiceMetric<B> {
    pub(crate) const fn new(
        class_thresholds: Vec<f64>,
        include_background: bool,
        distance_metric: DistanceMetric,
        reduction: MetricReduction,
        get_not_nans: bool,
    ) -> Self {
        Self {
            class_thresholds,
            include_background,
            distance_metric,
            reduction,
            get_not_nans,
            buffer: Vec::new(),
            last_diagnostics: Vec::new(),
        }
    }

    pub fn state(&self) -> MetricState {
        if self.buffer.is_empty() {
            MetricState::Empty
        } else {
            MetricState::Accumulating
        }
    }

    pub fn class_thresholds(&self) -> &[f64] {
        &self.class_thresholds
    }

    /// Diagnostics of the most recent successful `update`.
    pub fn last_diagnostics(&self) -> &[EmptyBoundary] {
        &self.last_diagnostics
    }

    /// Computes the NSD of one batch and appends it to the buffer.
    ///
    /// Returns the `[batch, class]` result of this batch. On error the buffer
    /// is left untouched.
    pub fn update<const D: usize, K: BasicOps<B>>(
        &mut self,
        y_pred: Tensor<B, D, K>,
        y: Tensor<B, D, K>,
        spacing: &SpacingSpec,
    ) -> SurfaceDiceResult<Tensor<B, 2>> {
        let result = compute_surface_dice(
            y_pred,
            y,
            &self.class_thresholds,
            self.include_background,
            self.distance_metric,
            spacing,
        )?;

        for diagnostic in &result.diagnostics {
            tracing::warn!(
                sample = diagnostic.sample,
                class = diagnostic.class,
                "{diagnostic}"
            );
        }

        self.buffer.push(result.nsd.clone());
        self.last_diagnostics = result.diagnostics;
        tracing::debug!(
            dims = ?result.nsd.dims(),
            buffered = self.buffer.len(),
            "surface dice batch appended"
        );

        Ok(result.nsd)
    }

    /// All buffered results concatenated along the batch axis, `[N, class]`.
    ///
    /// # Errors
    /// `EmptyBuffer` before the first `update`; `InvalidBufferContents` when
    /// the buffered results disagree on the class count.
    pub fn get_buffer(&self) -> SurfaceDiceResult<Tensor<B, 2>> {
        let first = self.buffer.first().ok_or(SurfaceDiceError::EmptyBuffer)?;
        let [_, classes] = first.dims();
        if let Some(other) = self.buffer.iter().find(|t| t.dims()[1] != classes) {
            return Err(SurfaceDiceError::InvalidBufferContents {
                reason: format!(
                    "class counts differ across updates ({classes} and {})",
                    other.dims()[1]
                ),
            });
        }
        Ok(Tensor::cat(self.buffer.clone(), 0))
    }

    /// Reduces the buffer with `reduction`, or the configured default.
    ///
    /// The buffer itself is not modified.
    pub fn aggregate(&self, reduction: Option<MetricReduction>) -> SurfaceDiceResult<Aggregate<B>> {
        let data = self.get_buffer()?;
        Ok(self.reduce(data, reduction.unwrap_or(self.reduction)))
    }

    /// Like [`Self::aggregate`], with the reduction given by name
    /// (`"none"`, `"mean"`, `"sum"`, `"mean_batch"`, `"sum_batch"`,
    /// `"mean_channel"`, `"sum_channel"`).
    pub fn aggregate_by_name(&self, reduction: &str) -> SurfaceDiceResult<Aggregate<B>> {
        let data = self.get_buffer()?;
        Ok(self.reduce(data, reduction.parse()?))
    }

    /// Clears the buffer.
    pub fn reset(&mut self) {
        tracing::debug!(buffered = self.buffer.len(), "surface dice buffer reset");
        self.buffer.clear();
        self.last_diagnostics.clear();
    }

    fn reduce(&self, data: Tensor<B, 2>, reduction: MetricReduction) -> Aggregate<B> {
        tracing::debug!(dims = ?data.dims(), %reduction, "aggregating surface dice");
        let (value, not_nans) = do_metric_reduction(data, reduction);
        if self.get_not_nans {
            Aggregate::WithNotNans { value, not_nans }
        } else {
            Aggregate::Value(value)
        }
    }
}
