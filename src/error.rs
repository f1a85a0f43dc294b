use thiserror::Error;

/// Possible errors that arise due to issues with segmentation input data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentationError {
    #[error("Grid width must be greater than zero")]
    ZeroWidth,
    #[error("Grid rows are incomplete: {0}")]
    RaggedGrid(String),
    #[error("Invalid edge weight: {0}")]
    InvalidWeight(String),
    #[error("The graph provided has no nodes")]
    EmptyGraph,
    #[error("Node keys do not form a dense grid: {0}")]
    NonContiguousKeys(String),
}
