use crate::merge::{try_merge, DEFAULT_MERGE_LIMIT};
use crate::{Component, Edge, SegmentationError, SegmentationParams, WeightedGraph};
use log::{debug, trace};
use num_traits::Float;
use std::collections::BTreeMap;

/// Partitions the nodes of a graph into components using graph based segmentation.
///
/// Every node starts in its own component. Edges are then visited in ascending order of weight
/// and the two components an edge joins are merged if the edge weight is no greater than the
/// internal difference plus threshold of both of them.
///
/// # Parameters
/// * `graph` - the graph to segment.
/// * `threshold_fn` - the non-negative bias added to a component's internal difference. A
///                    typical choice is `k / (size + 1)` for a granularity constant `k`.
///
/// # Returns
/// * The components, which together hold every node key of the graph exactly once.
///
/// # Examples
/// ```
///use graph_segmentation::{indicator_difference, selective_search, WeightedGraph};
///
///let grid = vec![1, 1, 2, 2];
///let graph: WeightedGraph<f32> =
///    WeightedGraph::from_grid(&grid, 4, |a, b| indicator_difference(a, b)).unwrap();
///let components = selective_search(&graph, |c| 0.5 / (c.size() as f32 + 1.0));
///assert_eq!(components.len(), 2);
/// ```
pub fn selective_search<'a, T, F>(
    graph: &'a WeightedGraph<T>,
    threshold_fn: F,
) -> Vec<Component<'a, T>>
where
    T: Float,
    F: Fn(&Component<'a, T>) -> T,
{
    fold_edges(graph, threshold_fn, DEFAULT_MERGE_LIMIT)
}

fn fold_edges<'a, T, F>(
    graph: &'a WeightedGraph<T>,
    threshold_fn: F,
    merge_limit: usize,
) -> Vec<Component<'a, T>>
where
    T: Float,
    F: Fn(&Component<'a, T>) -> T,
{
    let mut segmentation: Vec<Component<'a, T>> = graph
        .keys()
        .iter()
        .map(|&key| Component::singleton(key, graph))
        .collect();
    let (mut n_accepted, mut n_rejected) = (0_usize, 0_usize);

    for edge in graph.edges() {
        segmentation = try_merge(
            segmentation,
            |component| component.contains(edge.first) || component.contains(edge.second),
            |mergeable| {
                if is_weak_edge(edge, &mergeable, &threshold_fn) {
                    n_accepted += 1;
                    mergeable.into_iter().reduce(Component::merge).into_iter().collect()
                } else {
                    n_rejected += 1;
                    mergeable
                }
            },
            merge_limit,
        );
    }

    debug!(
        "Segmented {} nodes over {} edges into {} components ({n_accepted} merges accepted, \
        {n_rejected} rejected)",
        graph.node_count(),
        graph.edge_count(),
        segmentation.len()
    );
    segmentation
}

fn is_weak_edge<'a, T, F>(
    edge: &Edge<T>,
    mergeable: &[Component<'a, T>],
    threshold_fn: &F,
) -> bool
where
    T: Float,
    F: Fn(&Component<'a, T>) -> T,
{
    let min_internal_difference = mergeable
        .iter()
        .map(|component| component.internal_difference() + threshold_fn(component))
        .fold(T::infinity(), T::min);
    let is_weak = edge.weight <= min_internal_difference;
    trace!(
        "Edge ({}, {}) {} components {:?}",
        edge.first,
        edge.second,
        if is_weak { "merges" } else { "separates" },
        mergeable.iter().map(Component::id).collect::<Vec<_>>()
    );
    is_weak
}

/// Maps every node key in `components` to the position of its component in the list.
pub fn label_nodes<T>(components: &[Component<T>]) -> BTreeMap<usize, usize>
where
    T: Float,
{
    components
        .iter()
        .enumerate()
        .flat_map(|(label, component)| component.members().iter().map(move |&key| (key, label)))
        .collect()
}

/// The selective search segmentation driver, configured by `SegmentationParams`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectiveSearch<'a, T> {
    graph: &'a WeightedGraph<T>,
    params: SegmentationParams,
}

impl<'a, T: Float> SelectiveSearch<'a, T> {
    /// Creates a segmentation driver over `graph` with custom parameters.
    ///
    /// # Examples
    /// ```
    ///use graph_segmentation::{absolute_difference, SegmentationParams, SelectiveSearch,
    ///    ThresholdPolicy, WeightedGraph};
    ///
    ///let grid = vec![0.0_f32, 0.1, 0.9, 1.0];
    ///let graph = WeightedGraph::from_grid(&grid, 2, absolute_difference).unwrap();
    ///let params = SegmentationParams::builder()
    ///    .granularity(0.2)
    ///    .threshold_policy(ThresholdPolicy::Constant)
    ///    .build();
    ///let segmenter = SelectiveSearch::new(&graph, params);
    ///assert_eq!(segmenter.segment().unwrap().len(), 2);
    /// ```
    pub fn new(graph: &'a WeightedGraph<T>, params: SegmentationParams) -> Self {
        SelectiveSearch { graph, params }
    }

    /// Creates a segmentation driver over `graph` with the default parameters.
    pub fn default_params(graph: &'a WeightedGraph<T>) -> Self {
        SelectiveSearch::new(graph, SegmentationParams::default())
    }

    /// Runs the segmentation.
    ///
    /// # Returns
    /// * The components partitioning the graph's nodes, or an error if the graph has no nodes.
    pub fn segment(&self) -> Result<Vec<Component<'a, T>>, SegmentationError> {
        if self.graph.node_count() == 0 {
            return Err(SegmentationError::EmptyGraph);
        }
        let params = &self.params;
        Ok(fold_edges(
            self.graph,
            |component| params.threshold(component),
            params.merge_limit,
        ))
    }

    /// Runs the segmentation on a grid graph and labels every cell.
    ///
    /// # Returns
    /// * One label per node in key order, or an error if the graph is empty or its node keys
    ///   are not `0..n`.
    pub fn label_grid(&self) -> Result<Vec<usize>, SegmentationError> {
        let n_nodes = self.graph.node_count();
        if let Some(&last) = self.graph.keys().iter().next_back() {
            if last + 1 != n_nodes {
                return Err(SegmentationError::NonContiguousKeys(format!(
                    "{n_nodes} nodes but the largest key is {last}"
                )));
            }
        }
        let components = self.segment()?;
        let mut labels = vec![0; n_nodes];
        for (key, label) in label_nodes(&components) {
            labels[key] = label;
        }
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ThresholdPolicy;

    fn pair(weight: f32) -> WeightedGraph<f32> {
        WeightedGraph::new(0..2, vec![Edge::new(0, 1, weight)])
    }

    #[test]
    fn merge_allowed_on_tie() {
        let graph = pair(0.5);
        let components = selective_search(&graph, |_| 0.5);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].id(), 0);
        assert_eq!(components[0].size(), 2);
    }

    #[test]
    fn merge_rejected_above_threshold() {
        let graph = pair(0.5);
        let components = selective_search(&graph, |_| 0.49);
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn smaller_bias_decides() {
        let edges = vec![
            Edge::new(0, 1, 0.1_f32),
            Edge::new(1, 2, 0.2),
            Edge::new(2, 3, 0.3),
        ];
        let graph = WeightedGraph::new(0..4, edges);
        // Only singletons get a bias, so {0, 1} refuses the heavier edge to 2
        let components = selective_search(&graph, |c| if c.size() == 1 { 1.0 } else { 0.0 });
        assert_eq!(components.len(), 2);
        let labels = label_nodes(&components);
        assert_eq!(labels[&0], labels[&1]);
        assert_eq!(labels[&2], labels[&3]);
        assert_ne!(labels[&1], labels[&2]);
    }

    #[test]
    fn edges_to_unknown_nodes_are_ignored() {
        let edges = vec![Edge::new(0, 7, 0.0_f32), Edge::new(8, 9, 0.0)];
        let graph = WeightedGraph::new(0..2, edges);
        let components = selective_search(&graph, |_| 1.0);
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn components_partition_nodes() {
        let grid = vec![0.0_f32, 0.0, 5.0, 5.0, 0.0, 0.0, 5.0, 9.0, 1.0];
        let graph =
            WeightedGraph::from_grid(&grid, 3, |a: &f32, b: &f32| (a - b).abs()).unwrap();
        let components = selective_search(&graph, |c| 0.5 / (c.size() as f32 + 1.0));
        let n_members: usize = components.iter().map(Component::size).sum();
        assert_eq!(n_members, grid.len());
        assert_eq!(label_nodes(&components).len(), grid.len());
    }

    #[test]
    fn segment_empty_graph() {
        let graph: WeightedGraph<f32> = WeightedGraph::default();
        let segmenter = SelectiveSearch::default_params(&graph);
        assert!(matches!(segmenter.segment(), Err(SegmentationError::EmptyGraph)));
        assert!(matches!(segmenter.label_grid(), Err(SegmentationError::EmptyGraph)));
    }

    #[test]
    fn label_grid_requires_dense_keys() {
        let graph = WeightedGraph::new([0, 1, 5], vec![Edge::new(0, 1, 0.0_f32)]);
        let segmenter = SelectiveSearch::default_params(&graph);
        assert!(matches!(
            segmenter.label_grid(),
            Err(SegmentationError::NonContiguousKeys(..))
        ));
    }

    #[test]
    fn wider_merge_limit_matches_default_on_disjoint_components() {
        let grid = vec![1, 1, 2, 2, 1, 3, 3, 3, 1];
        let graph: WeightedGraph<f32> =
            WeightedGraph::from_grid(&grid, 3, |a, b| crate::indicator_difference(a, b)).unwrap();
        let narrow = SelectiveSearch::default_params(&graph).segment().unwrap();
        let params = SegmentationParams::builder()
            .merge_limit(4)
            .threshold_policy(ThresholdPolicy::SizeScaled)
            .build();
        let wide = SelectiveSearch::new(&graph, params).segment().unwrap();
        assert_eq!(narrow, wide);
    }
}
