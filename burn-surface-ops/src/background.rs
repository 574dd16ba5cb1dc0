//! # Background Filtering
//!
//! Removes the background channel (class index 0) from batch-first
//! segmentation tensors `[batch, class, ...]`.

use burn::prelude::*;
use burn::tensor::BasicOps;

/// Channel operations on batch-first segmentation tensors.
pub trait SegmentationTensorOps {
    /// Drops class channel 0. Tensors with fewer than two axes or a single
    /// class channel are returned unchanged. Tensors with a zero-length axis
    /// keep that axis and lose one channel.
    fn drop_background(self) -> Self;
}

impl<B: Backend, const D: usize, K: BasicOps<B>> SegmentationTensorOps for Tensor<B, D, K> {
    fn drop_background(self) -> Self {
        let mut dims = self.dims();
        let channels = match dims.get(1).copied() {
            Some(channels) if channels > 1 => channels,
            _ => return self,
        };

        // Slicing rejects empty ranges, so zero-sized tensors are rebuilt.
        if dims.contains(&0) {
            if let Some(slot) = dims.get_mut(1) {
                *slot = channels - 1;
            }
            return Tensor::empty(dims, &self.device());
        }

        self.narrow(1, 1, channels - 1)
    }
}

/// Drops the background channel from both prediction and reference.
pub fn ignore_background<T: SegmentationTensorOps>(y_pred: T, y: T) -> (T, T) {
    (y_pred.drop_background(), y.drop_background())
}
