use num_traits::Float;
use std::cmp::Ordering;

/// An undirected, weighted connection between two node keys. The weight measures
/// dissimilarity between the endpoints, so a weight of zero means they are identical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<T> {
    pub first: usize,
    pub second: usize,
    pub weight: T,
}

impl<T: Float> Edge<T> {
    pub fn new(first: usize, second: usize, weight: T) -> Self {
        Edge {
            first,
            second,
            weight,
        }
    }

    /// Whether either endpoint of the edge is `key`.
    pub fn touches(&self, key: usize) -> bool {
        self.first == key || self.second == key
    }

    /// Whether both edges join the same pair of nodes, regardless of direction.
    pub fn same_endpoints(&self, other: &Edge<T>) -> bool {
        (self.first == other.first && self.second == other.second)
            || (self.first == other.second && self.second == other.first)
    }

    // NaN weights order after every real weight
    pub(crate) fn cmp_weight(&self, other: &Edge<T>) -> Ordering {
        match (self.weight.is_nan(), other.weight.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self
                .weight
                .partial_cmp(&other.weight)
                .unwrap_or(Ordering::Equal),
        }
    }
}
