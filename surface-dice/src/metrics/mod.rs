//! Surface Dice metric.
//!
//! - `correctness`: the per-pair boundary correctness ratio
//! - `surface_dice`: validation and batched NSD computation
//! - `reduction`: NaN-aware reduction of `[batch, class]` results
//! - `cumulative`: the accumulate-then-aggregate metric

pub mod correctness;
pub mod cumulative;
pub mod input;
pub mod reduction;
pub mod surface_dice;
#[cfg(feature = "train")]
mod train;

pub use correctness::boundary_correctness;
pub use cumulative::{Aggregate, MetricState, SurfaceDiceMetric};
pub use input::SurfaceDiceInput;
pub use reduction::{do_metric_reduction, MetricTensor};
pub use surface_dice::{compute_surface_dice, BoundarySide, EmptyBoundary, SurfaceDice};
