//! Configuration module for the Surface Dice metric.
//!
//! - `core`: the metric configuration structure
//! - `enums`: the reduction modes

pub mod core;
pub mod enums;

pub use self::core::SurfaceDiceMetricConfig;
pub use self::enums::MetricReduction;
