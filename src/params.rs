use crate::merge::DEFAULT_MERGE_LIMIT;
use crate::Component;
use log::warn;
use num_traits::Float;

// Defaults for parameters
const GRANULARITY_DEFAULT: f64 = 0.5;
const THRESHOLD_POLICY_DEFAULT: ThresholdPolicy = ThresholdPolicy::SizeScaled;

// Valid minimums/left bounds of parameters
const GRANULARITY_MINIMUM: f64 = 0.0;
const MERGE_LIMIT_MINIMUM: usize = 2;

/// How the granularity constant `k` is turned into a merge threshold for a component.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ThresholdPolicy {
    /// `k / (size + 1)`. Small components merge readily, large ones need a low edge weight.
    SizeScaled,
    /// `k` regardless of component size.
    Constant,
}

/// The parameters used by selective search. Use `SegmentationParams::default()` unless you want
/// to tune the coarseness of the segmentation.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationParams {
    pub(crate) granularity: f64,
    pub(crate) threshold_policy: ThresholdPolicy,
    pub(crate) merge_limit: usize,
}

/// Builder object to set custom segmentation parameters.
#[derive(Debug, Clone, Default)]
pub struct ParamBuilder {
    granularity: Option<f64>,
    threshold_policy: Option<ThresholdPolicy>,
    merge_limit: Option<usize>,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SegmentationParams {
    /// Enters the builder pattern, allowing custom parameters to be set using various setter
    /// methods.
    ///
    /// # Returns
    /// * the parameter builder
    pub fn builder() -> ParamBuilder {
        ParamBuilder::default()
    }

    pub fn granularity(&self) -> f64 {
        self.granularity
    }

    pub fn threshold_policy(&self) -> ThresholdPolicy {
        self.threshold_policy
    }

    pub fn merge_limit(&self) -> usize {
        self.merge_limit
    }

    /// The bias added to a component's internal difference when deciding whether an edge is
    /// weak enough to merge across.
    pub fn threshold<T: Float>(&self, component: &Component<T>) -> T {
        let k = T::from(self.granularity).unwrap_or_else(T::zero);
        match self.threshold_policy {
            ThresholdPolicy::SizeScaled => {
                k / T::from(component.size() + 1).unwrap_or_else(T::one)
            }
            ThresholdPolicy::Constant => k,
        }
    }
}

impl ParamBuilder {
    /// Sets the granularity constant `k`. Larger values favour larger components, so the
    /// segmentation becomes coarser. Defaults to 0.5.
    ///
    /// # Parameters
    /// * granularity - the non-negative granularity constant
    ///
    /// # Returns
    /// * the parameter builder
    pub fn granularity(mut self, granularity: f64) -> ParamBuilder {
        let valid_granularity = if granularity.is_nan() || granularity < GRANULARITY_MINIMUM {
            warn!(
                "granularity ({granularity}) cannot be lower than {GRANULARITY_MINIMUM}. \
                Set to {GRANULARITY_MINIMUM}."
            );
            GRANULARITY_MINIMUM
        } else {
            granularity
        };
        self.granularity = Some(valid_granularity);
        self
    }

    /// Sets how the granularity is scaled per component. Defaults to `SizeScaled`.
    ///
    /// # Parameters
    /// * threshold_policy - the threshold policy
    ///
    /// # Returns
    /// * the parameter builder
    pub fn threshold_policy(mut self, threshold_policy: ThresholdPolicy) -> ParamBuilder {
        self.threshold_policy = Some(threshold_policy);
        self
    }

    /// Sets the maximum number of components pulled into a single merge. Defaults to 2, which is
    /// all a single edge can touch when components are disjoint.
    ///
    /// # Parameters
    /// * merge_limit - the merge limit
    ///
    /// # Returns
    /// * the parameter builder
    pub fn merge_limit(mut self, merge_limit: usize) -> ParamBuilder {
        let valid_merge_limit = if merge_limit < MERGE_LIMIT_MINIMUM {
            warn!(
                "merge_limit ({merge_limit}) cannot be lower than {MERGE_LIMIT_MINIMUM}. \
                Set to {MERGE_LIMIT_MINIMUM}."
            );
            MERGE_LIMIT_MINIMUM
        } else {
            merge_limit
        };
        self.merge_limit = Some(valid_merge_limit);
        self
    }

    /// Finishes the building of the parameters.
    ///
    /// # Returns
    /// * The completed segmentation parameters.
    pub fn build(self) -> SegmentationParams {
        SegmentationParams {
            granularity: self.granularity.unwrap_or(GRANULARITY_DEFAULT),
            threshold_policy: self.threshold_policy.unwrap_or(THRESHOLD_POLICY_DEFAULT),
            merge_limit: self.merge_limit.unwrap_or(DEFAULT_MERGE_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeightedGraph;

    #[test]
    fn defaults() {
        let params = SegmentationParams::default();
        assert_eq!(params.granularity(), 0.5);
        assert_eq!(params.threshold_policy(), ThresholdPolicy::SizeScaled);
        assert_eq!(params.merge_limit(), 2);
    }

    #[test]
    fn out_of_bounds_values_are_clamped() {
        let params = SegmentationParams::builder()
            .granularity(-3.0)
            .merge_limit(1)
            .build();
        assert_eq!(params.granularity(), 0.0);
        assert_eq!(params.merge_limit(), 2);

        let params = SegmentationParams::builder().granularity(f64::NAN).build();
        assert_eq!(params.granularity(), 0.0);
    }

    #[test]
    fn size_scaled_threshold() {
        let graph: WeightedGraph<f32> = WeightedGraph::new(0..4, Vec::new());
        let params = SegmentationParams::builder().granularity(1.5).build();
        let singleton = Component::singleton(0, &graph);
        let triple = Component::new(1, &graph, [1, 2, 3]);
        assert_eq!(params.threshold(&singleton), 0.75);
        assert_eq!(params.threshold(&triple), 0.375);
    }

    #[test]
    fn constant_threshold() {
        let graph: WeightedGraph<f32> = WeightedGraph::new(0..4, Vec::new());
        let params = SegmentationParams::builder()
            .granularity(2.0)
            .threshold_policy(ThresholdPolicy::Constant)
            .build();
        let triple = Component::new(1, &graph, [1, 2, 3]);
        assert_eq!(params.threshold(&triple), 2.0);
    }
}
