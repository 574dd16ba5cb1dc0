//! Burn `Learner` integration.

use burn::{
    prelude::*,
    train::metric::{Metric, MetricEntry, MetricMetadata, Numeric},
};
use burn_surface_ops::SpacingSpec;

use super::cumulative::SurfaceDiceMetric;
use super::input::SurfaceDiceInput;
use crate::config::MetricReduction;

impl<B: Backend> Metric for SurfaceDiceMetric<B> {
    type Input = SurfaceDiceInput<B>;

    fn name(&self) -> String {
        "SurfaceDice".to_owned()
    }

    fn update(&mut self, item: &Self::Input, _metadata: &MetricMetadata) -> MetricEntry {
        // A rejected batch is logged and skipped so training keeps running.
        if let Err(err) = SurfaceDiceMetric::update(
            self,
            item.y_pred.clone(),
            item.y.clone(),
            &SpacingSpec::Unit,
        ) {
            tracing::error!(error = %err, "surface dice update rejected");
        }

        let value = Numeric::value(self);
        MetricEntry::new(self.name(), format!("{value:.5}"), format!("{value:.5}"))
    }

    fn clear(&mut self) {
        self.reset();
    }
}

impl<B: Backend> Numeric for SurfaceDiceMetric<B> {
    /// Mean NSD over the buffer, NaN while the buffer is empty.
    fn value(&self) -> f64 {
        self.aggregate(Some(MetricReduction::Mean))
            .ok()
            .and_then(|aggregate| aggregate.into_value().to_vec().first().copied())
            .unwrap_or(f64::NAN)
    }
}
