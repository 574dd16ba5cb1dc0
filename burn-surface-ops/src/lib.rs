//! Boundary operations for the Burn deep learning framework
//!
//! This crate provides the building blocks of boundary-based segmentation
//! metrics: background channel filtering, binary mask edge extraction, exact
//! distance transforms and per-pixel surface distances, and pixel spacing
//! resolution.

mod background;
mod distance;
mod edges;
mod error;
mod mask;
mod spacing;

// Convenient re-exports
pub use background::{ignore_background, SegmentationTensorOps};
pub use distance::{distance_transform, surface_distance, DistanceMetric};
pub use edges::{boundary, mask_edges};
pub use error::{SurfaceOpsError, SurfaceOpsResult};
pub use mask::BinaryMask;
pub use spacing::{resolve_spacing, SpacingSpec};
