use crate::merge::{merge, DEFAULT_MERGE_LIMIT};
use crate::validation::GridValidator;
use crate::{Edge, SegmentationError};
use log::trace;
use num_traits::Float;
use std::collections::BTreeSet;

/// An immutable, undirected weighted graph. Edges are kept sorted by ascending weight, with
/// equal weights left in the order they were supplied. Every operation that derives a new
/// graph (sub graphs, unions, spanning trees) returns a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedGraph<T> {
    keys: BTreeSet<usize>,
    edges: Vec<Edge<T>>,
}

impl<T> Default for WeightedGraph<T> {
    fn default() -> Self {
        WeightedGraph {
            keys: BTreeSet::new(),
            edges: Vec::new(),
        }
    }
}

impl<T: Float> WeightedGraph<T> {
    /// Creates a graph from a set of node keys and a list of edges. Edge endpoints are not
    /// checked against the node keys.
    ///
    /// # Examples
    /// ```
    ///use graph_segmentation::{Edge, WeightedGraph};
    ///
    ///let graph = WeightedGraph::new(0..3, vec![Edge::new(0, 1, 2.0_f32), Edge::new(1, 2, 1.0)]);
    ///assert_eq!(graph.min_distance(), Some(&Edge::new(1, 2, 1.0)));
    /// ```
    pub fn new(keys: impl IntoIterator<Item = usize>, edges: Vec<Edge<T>>) -> Self {
        let mut graph = WeightedGraph {
            keys: keys.into_iter().collect(),
            edges,
        };
        graph.sort_edges();
        graph
    }

    /// Builds a 4-neighbour lattice over a row-major grid of values. Each cell is a node keyed
    /// by its index, joined to the cell on its right and the cell below it.
    ///
    /// # Parameters
    /// * `values` - the grid cells in row-major order.
    /// * `width` - the number of cells per row.
    /// * `diff_fn` - the dissimilarity between two neighbouring cells. Must be finite and
    ///               non-negative.
    ///
    /// # Returns
    /// * The lattice graph, or an error if the width is zero, the last row is incomplete or a
    ///   difference is negative or non-finite.
    ///
    /// # Examples
    /// ```
    ///use graph_segmentation::{absolute_difference, WeightedGraph};
    ///
    ///let grid = vec![0.0_f32, 1.0, 0.0, 2.0, 0.0, -1.0, 1.0, 1.0, 1.0];
    ///let graph = WeightedGraph::from_grid(&grid, 3, absolute_difference).unwrap();
    ///assert_eq!(graph.edge_count(), 12);
    ///assert_eq!(graph.max_distance().map(|e| e.weight), Some(2.0));
    /// ```
    pub fn from_grid<V, F>(
        values: &[V],
        width: usize,
        diff_fn: F,
    ) -> Result<Self, SegmentationError>
    where
        F: Fn(&V, &V) -> T,
    {
        let validator = GridValidator::new(values.len(), width);
        validator.validate_shape()?;

        let lattice_edge = |a: usize, b: usize| Edge::new(a, b, diff_fn(&values[a], &values[b]));
        let mut edges = Vec::with_capacity(2 * values.len());
        for n in 0..values.len() {
            if (n + 1) % width != 0 {
                edges.push(lattice_edge(n, n + 1));
            }
            if n + width < values.len() {
                edges.push(lattice_edge(n, n + width));
            }
        }
        validator.validate_weights(&edges)?;

        Ok(WeightedGraph::new(0..values.len(), edges))
    }

    /// The union of two graphs plus one edge connecting them. Neither input is modified and
    /// duplicate edges are kept.
    pub fn union(lhs: &WeightedGraph<T>, rhs: &WeightedGraph<T>, edge: Edge<T>) -> Self {
        let keys = lhs.keys.union(&rhs.keys).copied();
        let edges = lhs
            .edges
            .iter()
            .chain(rhs.edges.iter())
            .copied()
            .chain(std::iter::once(edge))
            .collect();
        WeightedGraph::new(keys, edges)
    }

    fn singleton(key: usize) -> Self {
        WeightedGraph::new([key], Vec::new())
    }

    pub fn contains_node(&self, key: usize) -> bool {
        self.keys.contains(&key)
    }

    pub fn keys(&self) -> &BTreeSet<usize> {
        &self.keys
    }

    /// The edges of the graph in ascending order of weight.
    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.keys.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The lowest weight edge, or `None` if the graph has no edges.
    pub fn min_distance(&self) -> Option<&Edge<T>> {
        self.edges.first()
    }

    /// The highest weight edge, or `None` if the graph has no edges.
    pub fn max_distance(&self) -> Option<&Edge<T>> {
        self.edges.last()
    }

    pub fn total_weight(&self) -> T {
        self.edges
            .iter()
            .map(|edge| edge.weight)
            .fold(T::zero(), std::ops::Add::add)
    }

    /// Projects the graph onto `keys`. Only edges with both endpoints in `keys` survive, and the
    /// node keys of the result are the endpoints of those edges. A requested key that no
    /// surviving edge touches is therefore not part of the result.
    pub fn sub_graph(&self, keys: &BTreeSet<usize>) -> Self {
        let edges: Vec<Edge<T>> = self
            .edges
            .iter()
            .filter(|edge| keys.contains(&edge.first) && keys.contains(&edge.second))
            .copied()
            .collect();
        let sub_keys: BTreeSet<usize> = edges
            .iter()
            .flat_map(|edge| [edge.first, edge.second])
            .collect();
        WeightedGraph::new(sub_keys, edges)
    }

    /// Computes the minimum spanning tree using Kruskal's algorithm.
    ///
    /// # Returns
    /// * The spanning tree as a new graph over the same node keys, or `None` if the graph is
    ///   empty or disconnected.
    ///
    /// # Examples
    /// ```
    ///use graph_segmentation::{Edge, WeightedGraph};
    ///
    ///let edges = vec![Edge::new(0, 1, 1.0_f32), Edge::new(1, 2, 2.0), Edge::new(0, 2, 3.0)];
    ///let graph = WeightedGraph::new(0..3, edges);
    ///let tree = graph.minimum_spanning_tree().unwrap();
    ///assert_eq!(tree.edge_count(), 2);
    ///assert_eq!(tree.total_weight(), 3.0);
    ///
    ///let disconnected = WeightedGraph::new(0..4, vec![Edge::new(0, 1, 1.0_f32)]);
    ///assert!(disconnected.minimum_spanning_tree().is_none());
    /// ```
    pub fn minimum_spanning_tree(&self) -> Option<Self> {
        let mut trees = self.kruskal(true);
        if trees.len() == 1 {
            trees.pop()
        } else {
            trace!(
                "No spanning tree over {} nodes, {} pieces remain",
                self.node_count(),
                trees.len()
            );
            None
        }
    }

    /// Computes a minimum spanning tree for every connected piece of the graph. Isolated nodes
    /// come back as trees without edges.
    pub fn minimum_spanning_forest(&self) -> Vec<Self> {
        self.kruskal(false)
    }

    fn kruskal(&self, stop_when_spanning: bool) -> Vec<Self> {
        let mut trees: Vec<Self> = self.keys.iter().map(|&key| Self::singleton(key)).collect();
        for edge in &self.edges {
            if stop_when_spanning && trees.len() == 1 {
                break;
            }
            // An edge inside a single tree matches only that tree and is discarded
            trees = merge(
                trees,
                |tree| tree.contains_node(edge.first) || tree.contains_node(edge.second),
                |touched| {
                    touched
                        .into_iter()
                        .reduce(|lhs, rhs| WeightedGraph::union(&lhs, &rhs, *edge))
                        .unwrap_or_default()
                },
                DEFAULT_MERGE_LIMIT,
            );
        }
        trees
    }

    fn sort_edges(&mut self) {
        self.edges.sort_by(|a, b| a.cmp_weight(b));
    }
}
