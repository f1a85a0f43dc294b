//! Graph based image segmentation in Rust. Generic over floating point edge weights.
//!
//! An input grid (pixels, depth samples or any other comparable per-cell values) is turned into
//! a weighted lattice graph, where each edge weight measures how different two neighbouring
//! cells are. Selective search then partitions the graph's nodes into regions:
//!  1. Every node starts out as a region of its own;
//!  2. Edges are visited from the most similar to the least similar pair of nodes; and
//!  3. The two regions an edge joins are merged when the edge is no heavier than the internal
//!     difference of either region plus a size dependent threshold. The internal difference of a
//!     region is the heaviest edge in its minimum spanning tree, so a region that is already
//!     heterogeneous tolerates a heavier edge.
//!
//! The threshold function is supplied by the caller, which keeps the coarseness of the
//! segmentation separate from the merging mechanism. `k / (size + 1)` for a granularity
//! constant `k` is the usual choice and is what `SegmentationParams` provides by default.
//!
//! # Examples
//! ```
//!use std::collections::HashSet;
//!use graph_segmentation::{indicator_difference, SelectiveSearch, WeightedGraph};
//!
//!let grid: Vec<i32> = vec![
//!    0, 1, 1, 0, 2, 2, 0,
//!    0, 1, 1, 0, 2, 2, 0,
//!    0, 0, 0, 0, 2, 2, 0,
//!    0, 0, 3, 0, 2, 2, 0,
//!    0, 3, 3, 0, 2, 2, 0,
//!    3, 3, 3, 3, 2, 2, 0,
//!];
//!let graph: WeightedGraph<f32> =
//!    WeightedGraph::from_grid(&grid, 7, |a, b| indicator_difference(a, b)).unwrap();
//!let segmenter = SelectiveSearch::default_params(&graph);
//!let components = segmenter.segment().unwrap();
//!assert_eq!(components.len(), 5);
//!
//!let labels = segmenter.label_grid().unwrap();
//!assert_eq!(5, labels.iter().collect::<HashSet<_>>().len());
//! ```
//!
//! # References
//! * [Felzenszwalb, P.F.; Huttenlocher, D.P. Efficient Graph-Based Image Segmentation.](http://vision.stanford.edu/teaching/cs231b_spring1415/papers/IJCV2004_FelzenszwalbHuttenlocher.pdf)
//! * [Uijlings, J.R.R. et al. Selective Search for Object Recognition.](https://ivi.fnwi.uva.nl/isis/publications/2013/UijlingsIJCV2013/UijlingsIJCV2013.pdf)

pub use crate::component::{Component, GridBounds};
pub use crate::difference::{absolute_difference, indicator_difference, CellDifference};
pub use crate::edge::Edge;
pub use crate::error::SegmentationError;
pub use crate::graph::WeightedGraph;
pub use crate::merge::{merge, try_merge, DEFAULT_MERGE_LIMIT};
pub use crate::params::{ParamBuilder, SegmentationParams, ThresholdPolicy};
pub use crate::segmentation::{label_nodes, selective_search, SelectiveSearch};

mod component;
mod difference;
mod edge;
mod error;
mod graph;
mod merge;
mod params;
mod segmentation;
mod validation;
