//! Convenience methods for constructing grids in a way that echoes,
//! but does not exactly match, methods common in scripting languages.
use itertools::Itertools;
use num_traits::Float;

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
///
/// Returns an empty Vec for `n == 0`, and `[start]` for `n == 1`.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    if n < 2 {
        return (0..n).map(|_| start).collect();
    }
    let steps = T::from(n - 1).unwrap_or_else(T::nan);
    let dx: T = (stop - start) / steps;
    (0..n)
        .map(|i| start + T::from(i).unwrap_or_else(T::nan) * dx)
        .collect()
}

/// Generates a meshgrid in C ordering (x0, y0, z0, x0, y0, z1, ..., x0, yn, zn),
/// which is also the ordering expected for grid values.
pub fn meshgrid<T>(x: Vec<&Vec<T>>) -> Vec<Vec<T>>
where
    T: Float,
{
    x.into_iter()
        .multi_cartesian_product()
        .map(|xx| xx.iter().map(|y| **y).collect())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0_f64, 4.0, 5), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(linspace(2.0_f64, 3.0, 1), vec![2.0]);
        assert!(linspace(2.0_f64, 3.0, 0).is_empty());
    }

    #[test]
    fn test_meshgrid_ordering() {
        let x = vec![0.0_f64, 1.0];
        let y = vec![10.0_f64, 20.0, 30.0];
        let grid = meshgrid(vec![&x, &y]);

        assert_eq!(grid.len(), 6);
        assert_eq!(grid[0], vec![0.0, 10.0]);
        assert_eq!(grid[1], vec![0.0, 20.0]);
        assert_eq!(grid[3], vec![1.0, 10.0]);
    }
}
