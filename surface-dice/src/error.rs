use burn_surface_ops::SurfaceOpsError;
use thiserror::Error;

/// The error type for `surface-dice-burn` operations.
///
/// Every variant is fatal: input validation errors are raised before any
/// per-pair work starts, buffer errors before any reduction runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceDiceError {
    /// An input tensor holds a data type that cannot be read as a mask.
    #[error("y_pred and y must be numeric or boolean tensors, got {dtype}")]
    InvalidInputType {
        /// The rejected data type.
        dtype: String,
    },

    /// An input tensor is not `[B,C,H,W]`.
    #[error("y_pred and y should have four dimensions: [B,C,H,W], got {y_pred} (y_pred) and {y} (y)")]
    InvalidRank {
        /// Rank of the prediction.
        y_pred: usize,
        /// Rank of the reference.
        y: usize,
    },

    /// Prediction and reference shapes differ.
    #[error("y_pred and y should have same shape, but instead, shapes are {y_pred:?} (y_pred) and {y:?} (y)")]
    ShapeMismatch {
        /// Shape of the prediction.
        y_pred: Vec<usize>,
        /// Shape of the reference.
        y: Vec<usize>,
    },

    /// A tensor holds non-integer or negative values.
    #[error("{tensor} should be a binarized tensor")]
    NotBinarized {
        /// `"y_pred"` or `"y"`.
        tensor: &'static str,
    },

    /// A tensor holds values greater than one.
    #[error("{tensor} should be one-hot encoded")]
    NotOneHot {
        /// `"y_pred"` or `"y"`.
        tensor: &'static str,
    },

    /// The class axis and the threshold list differ in length.
    #[error("number of classes ({classes}) does not match number of class thresholds ({thresholds})")]
    ThresholdCountMismatch {
        /// Class channels after background filtering.
        classes: usize,
        /// Provided thresholds.
        thresholds: usize,
    },

    #[error("all class thresholds need to be finite, class {class} has {value}")]
    NonFiniteThreshold { class: usize, value: f64 },

    #[error("all class thresholds need to be >= 0, class {class} has {value}")]
    NegativeThreshold { class: usize, value: f64 },

    /// The pixel spacing could not be resolved for the batch.
    #[error("Invalid spacing specification: {reason}")]
    InvalidSpacingSpec {
        /// Why the specification was rejected.
        reason: String,
    },

    #[error("Unknown distance metric: {name}")]
    UnknownDistanceMetric { name: String },

    /// A reduction mode name outside the supported set.
    #[error("Unknown reduction mode: {mode}")]
    UnknownReductionMode {
        /// The unrecognized name.
        mode: String,
    },

    /// `aggregate` or `get_buffer` was called before any successful `update`.
    #[error("the metric buffer is empty, call update before aggregate")]
    EmptyBuffer,

    /// The buffered results cannot be combined into a single `[N,C]` tensor.
    #[error("the data to aggregate must form a single [N,C] tensor: {reason}")]
    InvalidBufferContents {
        /// Why the buffer was rejected.
        reason: String,
    },
}

impl From<SurfaceOpsError> for SurfaceDiceError {
    fn from(err: SurfaceOpsError) -> Self {
        match err {
            SurfaceOpsError::InvalidSpacingSpec { reason } => Self::InvalidSpacingSpec { reason },
            SurfaceOpsError::UnknownDistanceMetric { name } => Self::UnknownDistanceMetric { name },
        }
    }
}

/// A specialized `Result` type for `surface-dice-burn` operations.
pub type SurfaceDiceResult<T> = Result<T, SurfaceDiceError>;
