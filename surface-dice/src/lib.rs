//! # Surface Dice for Burn
//!
//! Normalized Surface Distance (NSD, also "Surface Dice") for batched 2D
//! segmentation masks held in Burn tensors.
//!
//! For every (sample, class) pair the boundary pixels of the prediction and
//! the reference are extracted, their nearest-neighbour distances to the
//! opposite boundary are measured, and the fraction of boundary pixels lying
//! within a per-class tolerance is reported.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use burn::prelude::*;
//! use surface_dice_burn::{SpacingSpec, SurfaceDiceMetricConfig};
//!
//! # fn example<B: burn::tensor::backend::Backend>(y_pred: Tensor<B, 4>, y: Tensor<B, 4>) {
//! let mut metric = SurfaceDiceMetricConfig::new(vec![1.0, 2.0]).init::<B>();
//!
//! // One-hot [batch, class, height, width] masks, background in channel 0.
//! metric.update(y_pred, y, &SpacingSpec::Unit).unwrap();
//!
//! let nsd = metric.aggregate(None).unwrap();
//! println!("NSD: {:?}", nsd.value().to_vec());
//! # }
//! ```
//!
//! ## Features
//!
//! - `train`: implements Burn's `Metric` and `Numeric` traits so the metric
//!   can be registered with a `Learner`.

mod config;
mod error;
pub mod metrics;


pub use burn_surface_ops::{DistanceMetric, SpacingSpec};
pub use config::{MetricReduction, SurfaceDiceMetricConfig};
pub use error::{SurfaceDiceError, SurfaceDiceResult};
pub use metrics::{
    boundary_correctness, compute_surface_dice, do_metric_reduction, Aggregate, BoundarySide,
    EmptyBoundary, MetricState, MetricTensor, SurfaceDice, SurfaceDiceInput, SurfaceDiceMetric,
};
