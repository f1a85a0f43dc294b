use crate::{Edge, SegmentationError};
use num_traits::Float;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GridValidator {
    n_cells: usize,
    width: usize,
}

impl GridValidator {
    pub(crate) fn new(n_cells: usize, width: usize) -> Self {
        Self { n_cells, width }
    }

    pub(crate) fn validate_shape(&self) -> Result<(), SegmentationError> {
        if self.width == 0 {
            return Err(SegmentationError::ZeroWidth);
        }
        let remainder = self.n_cells % self.width;
        if remainder != 0 {
            return Err(SegmentationError::RaggedGrid(format!(
                "{} cells cannot be split into rows of width {}, the last row has {remainder}",
                self.n_cells, self.width
            )));
        }
        Ok(())
    }

    pub(crate) fn validate_weights<T: Float>(
        &self,
        edges: &[Edge<T>],
    ) -> Result<(), SegmentationError> {
        for edge in edges {
            if !edge.weight.is_finite() {
                return Err(SegmentationError::InvalidWeight(format!(
                    "difference between cells {} and {} is not finite",
                    edge.first, edge.second
                )));
            }
            if edge.weight < T::zero() {
                return Err(SegmentationError::InvalidWeight(format!(
                    "difference between cells {} and {} is negative",
                    edge.first, edge.second
                )));
            }
        }
        Ok(())
    }
}
