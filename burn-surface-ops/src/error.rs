use thiserror::Error;

/// The error type for the collaborator operations of this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOpsError {
    /// The pixel spacing specification could not be resolved for the batch.
    #[error("Invalid spacing specification: {reason}")]
    InvalidSpacingSpec {
        /// Why the specification was rejected.
        reason: String,
    },

    /// A distance metric name that is not one of `euclidean`, `chessboard` or `taxicab`.
    #[error("Unknown distance metric: {name}")]
    UnknownDistanceMetric {
        /// The unrecognized name.
        name: String,
    },
}

/// A specialized `Result` type for surface operations.
pub type SurfaceOpsResult<T> = Result<T, SurfaceOpsError>;
