//! Normalized Surface Distance (Surface Dice) for batched 2D segmentations.
//!
//! For every sample `b` and class `c` the boundaries of `y_pred[b, c]` and
//! `y[b, c]` are extracted, nearest-boundary distances are measured in both
//! directions, and the fraction of distances within the class threshold
//! `tau_c` is reported:
//!
//! ```text
//! NSD[b, c] = (|{d in D_pred->gt : d <= tau_c}| + |{d in D_gt->pred : d <= tau_c}|)
//!           / (|D_pred->gt| + |D_gt->pred|)
//! ```
//!
//! A class absent from both masks yields NaN; a class present in only one
//! of them yields 0. The boundary length is the number of edge pixels.

use core::fmt;

use burn::prelude::*;
use burn::tensor::{BasicOps, DType, TensorData};
use burn_surface_ops::{
    ignore_background, mask_edges, resolve_spacing, surface_distance, BinaryMask, DistanceMetric,
    SpacingSpec,
};
use rayon::prelude::*;

use super::correctness::boundary_correctness;
use crate::config::core::validate_thresholds;
use crate::error::{SurfaceDiceError, SurfaceDiceResult};

const SPATIAL_DIMS: usize = 2;

/// The side of a comparison whose mask had no boundary pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundarySide {
    Prediction,
    Reference,
}

/// Diagnostic for a (sample, class) pair with an all-background mask.
///
/// Informational only: the pair still gets a value (NaN or 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyBoundary {
    pub sample: usize,
    pub class: usize,
    pub side: BoundarySide,
}

impl fmt::Display for EmptyBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side {
            BoundarySide::Prediction => "prediction",
            BoundarySide::Reference => "ground truth",
        };
        write!(
            f,
            "the {side} of class {} in sample {} is all 0, this may result in nan/inf distance",
            self.class, self.sample
        )
    }
}

/// Result of [`compute_surface_dice`].
#[derive(Debug, Clone)]
pub struct SurfaceDice<B: Backend> {
    /// NSD values with shape `[batch, class]`, each in `[0, 1]` or NaN.
    pub nsd: Tensor<B, 2>,
    /// Empty-boundary diagnostics in batch-major, class-minor order.
    pub diagnostics: Vec<EmptyBoundary>,
}

/// Computes the Normalized Surface Distance between `y_pred` and `y`.
///
/// # Arguments
/// * `y_pred` - Predicted one-hot segmentation `[B, C, H, W]`.
/// * `y` - Reference one-hot segmentation `[B, C, H, W]`.
/// * `class_thresholds` - One finite, non-negative tolerance per class channel
///   (after background filtering).
/// * `include_background` - Keep class channel 0. When `false` it is dropped
///   from inputs with more than one channel.
/// * `distance_metric` - Metric for boundary distances.
/// * `spacing` - Pixel spacing, only used by [`DistanceMetric::Euclidean`].
///
/// # Returns
/// A `[B, C]` float tensor on the device of `y_pred`, plus diagnostics.
///
/// # Errors
/// Input validation runs completely before any pair is evaluated; see
/// [`SurfaceDiceError`] for the conditions.
pub fn compute_surface_dice<B, const D: usize, K>(
    y_pred: Tensor<B, D, K>,
    y: Tensor<B, D, K>,
    class_thresholds: &[f64],
    include_background: bool,
    distance_metric: DistanceMetric,
    spacing: &SpacingSpec,
) -> SurfaceDiceResult<SurfaceDice<B>>
where
    B: Backend,
    K: BasicOps<B>,
{
    let (y_pred, y) = if include_background {
        (y_pred, y)
    } else {
        ignore_background(y_pred, y)
    };
    let device = y_pred.device();

    let pred_data = y_pred.into_data();
    let y_data = y.into_data();
    check_input_type(pred_data.dtype)?;
    check_input_type(y_data.dtype)?;

    if pred_data.shape.len() != 4 || y_data.shape.len() != 4 {
        return Err(SurfaceDiceError::InvalidRank {
            y_pred: pred_data.shape.len(),
            y: y_data.shape.len(),
        });
    }
    if pred_data.shape != y_data.shape {
        return Err(SurfaceDiceError::ShapeMismatch {
            y_pred: pred_data.shape.clone(),
            y: y_data.shape.clone(),
        });
    }

    let pred_values: Vec<f64> = pred_data.iter::<f64>().collect();
    let y_values: Vec<f64> = y_data.iter::<f64>().collect();
    check_binarized(&pred_values, "y_pred")?;
    check_binarized(&y_values, "y")?;
    check_one_hot(&pred_values, "y_pred")?;
    check_one_hot(&y_values, "y")?;

    let [batch_size, n_class, height, width] = [
        pred_data.shape[0],
        pred_data.shape[1],
        pred_data.shape[2],
        pred_data.shape[3],
    ];

    if n_class != class_thresholds.len() {
        return Err(SurfaceDiceError::ThresholdCountMismatch {
            classes: n_class,
            thresholds: class_thresholds.len(),
        });
    }
    validate_thresholds(class_thresholds)?;

    let spacing_list = resolve_spacing(spacing, batch_size, SPATIAL_DIMS)?;

    tracing::debug!(
        batch_size,
        n_class,
        height,
        width,
        metric = %distance_metric,
        "computing surface dice"
    );

    let plane = height * width;
    let (values, diagnostics): (Vec<f64>, Vec<Vec<EmptyBoundary>>) = (0..batch_size * n_class)
        .into_par_iter()
        .map(|index| {
            let (sample, class) = (index / n_class, index % n_class);
            let window = index * plane..(index + 1) * plane;
            evaluate_pair(
                sample,
                class,
                &BinaryMask::from_values(height, width, &pred_values[window.clone()]),
                &BinaryMask::from_values(height, width, &y_values[window]),
                class_thresholds[class],
                distance_metric,
                &spacing_list[sample],
            )
        })
        .unzip();

    let nsd = Tensor::<B, 2>::from_data(
        TensorData::new(values, [batch_size, n_class]).convert::<B::FloatElem>(),
        &device,
    );

    Ok(SurfaceDice {
        nsd,
        diagnostics: diagnostics.into_iter().flatten().collect(),
    })
}

/// Evaluates a single (sample, class) pair.
fn evaluate_pair(
    sample: usize,
    class: usize,
    mask_pred: &BinaryMask,
    mask_gt: &BinaryMask,
    threshold: f64,
    distance_metric: DistanceMetric,
    spacing: &[f64],
) -> (f64, Vec<EmptyBoundary>) {
    let (edges_pred, edges_gt) = mask_edges(mask_pred, mask_gt, false);

    let mut diagnostics = Vec::new();
    if !edges_gt.any() {
        diagnostics.push(EmptyBoundary {
            sample,
            class,
            side: BoundarySide::Reference,
        });
    }
    if !edges_pred.any() {
        diagnostics.push(EmptyBoundary {
            sample,
            class,
            side: BoundarySide::Prediction,
        });
    }

    let pred_to_gt = surface_distance(&edges_pred, &edges_gt, distance_metric, spacing);
    let gt_to_pred = surface_distance(&edges_gt, &edges_pred, distance_metric, spacing);

    (
        boundary_correctness(&pred_to_gt, &gt_to_pred, threshold),
        diagnostics,
    )
}

/// Quantized tensors cannot be read back as exact 0/1 masks.
fn check_input_type(dtype: DType) -> SurfaceDiceResult<()> {
    match dtype {
        DType::QFloat(_) => Err(SurfaceDiceError::InvalidInputType {
            dtype: format!("{dtype:?}"),
        }),
        _ => Ok(()),
    }
}

/// Values must be non-negative integers (NaN fails too).
fn check_binarized(values: &[f64], tensor: &'static str) -> SurfaceDiceResult<()> {
    if values.iter().any(|&v| v.trunc() != v || v < 0.0) {
        return Err(SurfaceDiceError::NotBinarized { tensor });
    }
    Ok(())
}

fn check_one_hot(values: &[f64], tensor: &'static str) -> SurfaceDiceResult<()> {
    if values.iter().any(|&v| v > 1.0) {
        return Err(SurfaceDiceError::NotOneHot { tensor });
    }
    Ok(())
}
