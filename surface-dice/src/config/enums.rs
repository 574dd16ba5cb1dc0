//! Enumeration types for the Surface Dice configuration.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SurfaceDiceError;

/// How a `[batch, class]` result is collapsed. Every mode ignores NaN entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricReduction {
    /// Keep the raw `[batch, class]` values.
    None,
    /// Mean over classes per sample, then mean over samples with at least one value.
    #[default]
    Mean,
    /// Sum over every entry.
    Sum,
    /// Mean over the batch axis, one value per class.
    MeanBatch,
    /// Sum over the batch axis, one value per class.
    SumBatch,
    /// Mean over the class axis, one value per sample.
    MeanChannel,
    /// Sum over the class axis, one value per sample.
    SumChannel,
}

impl MetricReduction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mean => "mean",
            Self::Sum => "sum",
            Self::MeanBatch => "mean_batch",
            Self::SumBatch => "sum_batch",
            Self::MeanChannel => "mean_channel",
            Self::SumChannel => "sum_channel",
        }
    }
}

impl FromStr for MetricReduction {
    type Err = SurfaceDiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "mean" => Ok(Self::Mean),
            "sum" => Ok(Self::Sum),
            "mean_batch" => Ok(Self::MeanBatch),
            "sum_batch" => Ok(Self::SumBatch),
            "mean_channel" => Ok(Self::MeanChannel),
            "sum_channel" => Ok(Self::SumChannel),
            other => Err(SurfaceDiceError::UnknownReductionMode {
                mode: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for MetricReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
