//! Input structure for the Surface Dice metric in Burn training loops.

use burn::prelude::*;

/// Surface Dice metric input.
pub struct SurfaceDiceInput<B: Backend> {
    /// One-hot prediction with shape `[batch_size, classes, height, width]`.
    pub y_pred: Tensor<B, 4>,
    /// One-hot reference with shape `[batch_size, classes, height, width]`.
    pub y: Tensor<B, 4>,
}

impl<B: Backend> SurfaceDiceInput<B> {
    pub const fn new(y_pred: Tensor<B, 4>, y: Tensor<B, 4>) -> Self {
        Self { y_pred, y }
    }
}
