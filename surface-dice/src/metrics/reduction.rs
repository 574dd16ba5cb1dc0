//! NaN-aware reduction of `[batch, class]` metric tensors.

use burn::prelude::*;
use burn::tensor::TensorData;

use crate::config::MetricReduction;

/// A metric tensor before or after reduction.
#[derive(Debug, Clone)]
pub enum MetricTensor<B: Backend> {
    /// Unreduced values with shape `[batch, class]`.
    Full(Tensor<B, 2>),
    /// Reduced values: `[1]` for `mean`/`sum`, `[class]` for the batch
    /// modes, `[batch]` for the channel modes.
    Reduced(Tensor<B, 1>),
}

impl<B: Backend> MetricTensor<B> {
    pub fn dims(&self) -> Vec<usize> {
        match self {
            Self::Full(tensor) => tensor.dims().to_vec(),
            Self::Reduced(tensor) => tensor.dims().to_vec(),
        }
    }

    pub fn into_data(self) -> TensorData {
        match self {
            Self::Full(tensor) => tensor.into_data(),
            Self::Reduced(tensor) => tensor.into_data(),
        }
    }

    /// The values in row-major order.
    pub fn to_vec(&self) -> Vec<f64> {
        self.clone().into_data().iter::<f64>().collect()
    }
}

/// Reduces `f` according to `reduction`, ignoring NaN entries.
///
/// Returns the reduced values and the count of non-NaN entries behind each
/// of them. With [`MetricReduction::None`] the values are returned untouched
/// and the count is a 0/1 mask of the same shape.
///
/// [`MetricReduction::Mean`] averages over classes per sample first, then
/// over the samples that have at least one non-NaN class; its count is the
/// number of such samples. Means over nothing but NaN are 0.
pub fn do_metric_reduction<B: Backend>(
    f: Tensor<B, 2>,
    reduction: MetricReduction,
) -> (MetricTensor<B>, MetricTensor<B>) {
    let nans = f.clone().is_nan();
    let not_nans = nans.clone().bool_not().float();
    let filled = f.clone().mask_fill(nans, 0.0);

    match reduction {
        MetricReduction::None => (MetricTensor::Full(f), MetricTensor::Full(not_nans)),
        MetricReduction::Mean => {
            let per_sample_count = not_nans.sum_dim(1);
            let per_sample = filled
                .sum_dim(1)
                .div(per_sample_count.clone().clamp_min(1.0));
            let samples = per_sample_count.greater_elem(0.0).float().sum();
            let value = per_sample.sum().div(samples.clone().clamp_min(1.0));
            (MetricTensor::Reduced(value), MetricTensor::Reduced(samples))
        }
        MetricReduction::Sum => (
            MetricTensor::Reduced(filled.sum()),
            MetricTensor::Reduced(not_nans.sum()),
        ),
        MetricReduction::MeanBatch => {
            let count = not_nans.sum_dim(0);
            let value = filled.sum_dim(0).div(count.clone().clamp_min(1.0));
            (
                MetricTensor::Reduced(value.squeeze(0)),
                MetricTensor::Reduced(count.squeeze(0)),
            )
        }
        MetricReduction::SumBatch => (
            MetricTensor::Reduced(filled.sum_dim(0).squeeze(0)),
            MetricTensor::Reduced(not_nans.sum_dim(0).squeeze(0)),
        ),
        MetricReduction::MeanChannel => {
            let count = not_nans.sum_dim(1);
            let value = filled.sum_dim(1).div(count.clone().clamp_min(1.0));
            (
                MetricTensor::Reduced(value.squeeze(1)),
                MetricTensor::Reduced(count.squeeze(1)),
            )
        }
        MetricReduction::SumChannel => (
            MetricTensor::Reduced(filled.sum_dim(1).squeeze(1)),
            MetricTensor::Reduced(not_nans.sum_dim(1).squeeze(1)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn buffer() -> Tensor<TestBackend, 2> {
        Tensor::from_data([[1.0, f32::NAN], [0.5, 0.8]], &Default::default())
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn mean_channel_ignores_nan() {
        let (value, not_nans) = do_metric_reduction(buffer(), MetricReduction::MeanChannel);
        assert_close(&value.to_vec(), &[1.0, 0.65]);
        assert_close(&not_nans.to_vec(), &[1.0, 2.0]);
    }

    #[test]
    fn mean_is_mean_of_sample_means() {
        let (value, not_nans) = do_metric_reduction(buffer(), MetricReduction::Mean);
        assert_eq!(value.dims(), vec![1]);
        assert_close(&value.to_vec(), &[0.825]);
        assert_close(&not_nans.to_vec(), &[2.0]);
    }

    #[test]
    fn mean_skips_all_nan_samples() {
        let f = Tensor::<TestBackend, 2>::from_data(
            [[f32::NAN, f32::NAN], [0.4, 0.6]],
            &Default::default(),
        );
        let (value, not_nans) = do_metric_reduction(f, MetricReduction::Mean);
        assert_close(&value.to_vec(), &[0.5]);
        assert_close(&not_nans.to_vec(), &[1.0]);
    }

    #[test]
    fn all_nan_means_are_zero() {
        let f = Tensor::<TestBackend, 2>::from_data([[f32::NAN], [f32::NAN]], &Default::default());

        let (value, not_nans) = do_metric_reduction(f.clone(), MetricReduction::Mean);
        assert_close(&value.to_vec(), &[0.0]);
        assert_close(&not_nans.to_vec(), &[0.0]);

        let (value, _) = do_metric_reduction(f, MetricReduction::MeanBatch);
        assert_close(&value.to_vec(), &[0.0]);
    }

    #[test]
    fn sum_over_everything() {
        let (value, not_nans) = do_metric_reduction(buffer(), MetricReduction::Sum);
        assert_close(&value.to_vec(), &[2.3]);
        assert_close(&not_nans.to_vec(), &[3.0]);
    }

    #[test]
    fn batch_modes_keep_classes() {
        let (mean, count) = do_metric_reduction(buffer(), MetricReduction::MeanBatch);
        assert_close(&mean.to_vec(), &[0.75, 0.8]);
        assert_close(&count.to_vec(), &[2.0, 1.0]);

        let (sum, _) = do_metric_reduction(buffer(), MetricReduction::SumBatch);
        assert_close(&sum.to_vec(), &[1.5, 0.8]);
    }

    #[test]
    fn sum_channel_keeps_samples() {
        let (sum, count) = do_metric_reduction(buffer(), MetricReduction::SumChannel);
        assert_close(&sum.to_vec(), &[1.0, 1.3]);
        assert_close(&count.to_vec(), &[1.0, 2.0]);
    }

    #[test]
    fn none_keeps_raw_values() {
        let (value, not_nans) = do_metric_reduction(buffer(), MetricReduction::None);
        assert_eq!(value.dims(), vec![2, 2]);

        let values = value.to_vec();
        assert!(values[1].is_nan());
        assert_close(&[values[0], values[2], values[3]], &[1.0, 0.5, 0.8]);
        assert_close(&not_nans.to_vec(), &[1.0, 0.0, 1.0, 1.0]);
    }
}
