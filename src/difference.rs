use num_traits::Float;

/// Dissimilarity measures between multi-channel grid cells, for use as the difference function
/// when building a grid graph. Every variant is zero for identical cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellDifference {
    Euclidean,
    Manhattan,
    /// Mean over channels of the squared difference. With channels scaled to `[0, 1]` the
    /// result is also in `[0, 1]`.
    MeanSquared,
}

impl CellDifference {
    pub fn calc_diff<T: Float>(&self, a: &[T], b: &[T]) -> T {
        match *self {
            Self::Euclidean => euclidean_difference(a, b),
            Self::Manhattan => manhattan_difference(a, b),
            Self::MeanSquared => mean_squared_difference(a, b),
        }
    }
}

/// The absolute difference between two scalar cells.
pub fn absolute_difference<T: Float>(a: &T, b: &T) -> T {
    (*a - *b).abs()
}

/// Zero if the cells are equal, one otherwise.
pub fn indicator_difference<V: PartialEq, T: Float>(a: &V, b: &V) -> T {
    if a == b {
        T::zero()
    } else {
        T::one()
    }
}

fn squared_differences<'a, T: Float>(a: &'a [T], b: &'a [T]) -> impl Iterator<Item = T> + 'a {
    a.iter().zip(b.iter()).map(|(x, y)| (*x - *y) * (*x - *y))
}

fn euclidean_difference<T: Float>(a: &[T], b: &[T]) -> T {
    squared_differences(a, b)
        .fold(T::zero(), std::ops::Add::add)
        .sqrt()
}

fn manhattan_difference<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (*x - *y).abs())
        .fold(T::zero(), std::ops::Add::add)
}

fn mean_squared_difference<T: Float>(a: &[T], b: &[T]) -> T {
    let n_channels = a.len().min(b.len());
    if n_channels == 0 {
        return T::zero();
    }
    let total = squared_differences(a, b).fold(T::zero(), std::ops::Add::add);
    total / T::from(n_channels).unwrap_or_else(T::one)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_differences() {
        assert_eq!(absolute_difference(&1.5_f32, &4.0), 2.5);
        assert_eq!(absolute_difference(&4.0_f32, &1.5), 2.5);
        assert_eq!(indicator_difference::<i32, f32>(&3, &3), 0.0);
        assert_eq!(indicator_difference::<i32, f32>(&3, &4), 1.0);
    }

    #[test]
    fn channel_differences() {
        let a = [0.0_f32, 0.0, 0.0];
        let b = [1.0_f32, 2.0, 2.0];
        assert_eq!(CellDifference::Euclidean.calc_diff(&a, &b), 3.0);
        assert_eq!(CellDifference::Manhattan.calc_diff(&a, &b), 5.0);
        assert_eq!(CellDifference::MeanSquared.calc_diff(&a, &b), 3.0);
        assert_eq!(CellDifference::MeanSquared.calc_diff(&b, &b), 0.0);
    }

    #[test]
    fn empty_cells() {
        let empty: [f32; 0] = [];
        assert_eq!(CellDifference::MeanSquared.calc_diff(&empty, &empty), 0.0);
        assert_eq!(CellDifference::Euclidean.calc_diff(&empty, &empty), 0.0);
    }
}
