use crate::WeightedGraph;
use num_traits::Float;
use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};

/// A set of node keys grouped into one region of a segmentation.
///
/// A component borrows the graph it was derived from, so it can never outlive it. Its internal
/// difference is computed from that graph the first time it is requested and then cached.
#[derive(Clone)]
pub struct Component<'a, T> {
    id: usize,
    graph: &'a WeightedGraph<T>,
    members: BTreeSet<usize>,
    internal_difference: OnceCell<T>,
}

/// The inclusive row and column range a component covers in a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub min_row: usize,
    pub min_col: usize,
    pub max_row: usize,
    pub max_col: usize,
}

impl GridBounds {
    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }
}

impl<'a, T: Float> Component<'a, T> {
    /// Creates a component over `members` of `graph`, represented by `id`.
    pub fn new(
        id: usize,
        graph: &'a WeightedGraph<T>,
        members: impl IntoIterator<Item = usize>,
    ) -> Self {
        Component {
            id,
            graph,
            members: members.into_iter().collect(),
            internal_difference: OnceCell::new(),
        }
    }

    /// Creates a component holding only `key`, represented by that key.
    pub fn singleton(key: usize, graph: &'a WeightedGraph<T>) -> Self {
        Component::new(key, graph, [key])
    }

    /// Combines two components into a new one. The smaller of the two ids represents the
    /// result and its internal difference is computed afresh when next requested.
    pub fn merge(lhs: Component<'a, T>, rhs: Component<'a, T>) -> Self {
        debug_assert!(std::ptr::eq(lhs.graph, rhs.graph));
        let id = lhs.id.min(rhs.id);
        let mut members = lhs.members;
        members.extend(rhs.members);
        Component {
            id,
            graph: lhs.graph,
            members,
            internal_difference: OnceCell::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, key: usize) -> bool {
        self.members.contains(&key)
    }

    pub fn members(&self) -> &BTreeSet<usize> {
        &self.members
    }

    pub fn graph(&self) -> &'a WeightedGraph<T> {
        self.graph
    }

    /// The largest edge weight in the minimum spanning tree of the sub graph induced by the
    /// members. Zero for a singleton. If the members are not connected in the graph the largest
    /// weight across the spanning forest is used instead.
    pub fn internal_difference(&self) -> T {
        *self
            .internal_difference
            .get_or_init(|| self.calc_internal_difference())
    }

    fn calc_internal_difference(&self) -> T {
        if self.size() <= 1 {
            return T::zero();
        }
        let sub_graph = self.graph.sub_graph(&self.members);
        match sub_graph.minimum_spanning_tree() {
            Some(tree) => Self::largest_weight(&tree),
            None => sub_graph
                .minimum_spanning_forest()
                .iter()
                .map(Self::largest_weight)
                .fold(T::zero(), T::max),
        }
    }

    fn largest_weight(tree: &WeightedGraph<T>) -> T {
        tree.max_distance()
            .map(|edge| edge.weight)
            .unwrap_or_else(T::zero)
    }

    /// The rows and columns the component spans when its keys index a row-major grid of the
    /// given width.
    ///
    /// # Returns
    /// * The bounds, or `None` if the width is zero.
    pub fn grid_bounds(&self, width: usize) -> Option<GridBounds> {
        if width == 0 {
            return None;
        }
        self.members.iter().fold(None, |bounds, &key| {
            let (row, col) = (key / width, key % width);
            Some(match bounds {
                None => GridBounds {
                    min_row: row,
                    min_col: col,
                    max_row: row,
                    max_col: col,
                },
                Some(b) => GridBounds {
                    min_row: b.min_row.min(row),
                    min_col: b.min_col.min(col),
                    max_row: b.max_row.max(row),
                    max_col: b.max_col.max(col),
                },
            })
        })
    }
}

impl<'a, T: Debug> Debug for Component<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id)
            .field("members", &self.members)
            .field("internal_difference", &self.internal_difference.get())
            .finish()
    }
}

impl<'a, T> PartialEq for Component<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.members == other.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Edge;

    fn triangle() -> WeightedGraph<f32> {
        let edges = vec![
            Edge::new(0, 1, 2.0),
            Edge::new(1, 2, 3.0),
            Edge::new(0, 2, 5.0),
            Edge::new(2, 3, 4.0),
        ];
        WeightedGraph::new(0..5, edges)
    }

    #[test]
    fn singleton() {
        let graph = triangle();
        let component = Component::singleton(3, &graph);
        assert_eq!(component.id(), 3);
        assert_eq!(component.size(), 1);
        assert!(component.contains(3));
        assert!(!component.contains(2));
        assert_eq!(component.internal_difference(), 0.0);
    }

    #[test]
    fn internal_difference_is_largest_tree_edge() {
        let graph = triangle();
        let component = Component::new(0, &graph, [0, 1, 2]);
        assert_eq!(component.internal_difference(), 3.0);
    }

    #[test]
    fn internal_difference_is_cached() {
        let graph = triangle();
        let component = Component::new(0, &graph, [0, 1, 2]);
        assert!(component.internal_difference.get().is_none());
        let first = component.internal_difference();
        assert_eq!(component.internal_difference.get(), Some(&first));
        assert_eq!(component.internal_difference(), first);
    }

    #[test]
    fn disconnected_members() {
        let graph = triangle();
        let component = Component::new(0, &graph, [0, 1, 4]);
        assert_eq!(component.internal_difference(), 2.0);
        let component = Component::new(0, &graph, [0, 4]);
        assert_eq!(component.internal_difference(), 0.0);
    }

    #[test]
    fn merge_takes_smaller_id_and_resets_cache() {
        let graph = triangle();
        let lhs = Component::new(2, &graph, [2, 3]);
        let rhs = Component::new(0, &graph, [0, 1]);
        let (lhs_diff, rhs_diff) = (lhs.internal_difference(), rhs.internal_difference());
        assert_eq!((lhs_diff, rhs_diff), (4.0, 2.0));

        let merged = Component::merge(lhs, rhs);
        assert_eq!(merged.id(), 0);
        assert_eq!(merged.size(), 4);
        assert!(merged.internal_difference.get().is_none());
        assert_eq!(merged.internal_difference(), 4.0);
        assert!(merged.internal_difference() >= lhs_diff.max(rhs_diff));
    }

    #[test]
    fn grid_bounds() {
        let graph = triangle();
        let component = Component::new(1, &graph, [1, 4, 5]);
        let bounds = component.grid_bounds(3).unwrap();
        assert_eq!(
            bounds,
            GridBounds {
                min_row: 0,
                min_col: 1,
                max_row: 1,
                max_col: 2
            }
        );
        assert_eq!((bounds.height(), bounds.width()), (2, 2));
        assert!(component.grid_bounds(0).is_none());
    }
}
