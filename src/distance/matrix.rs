//! Dense and period-sliced travel matrices.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A dense n×n matrix stored in row-major order, indexed by node id.
///
/// # Examples
///
/// ```
/// use dock_vrp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 7.0, 0.0]).unwrap();
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert_eq!(dm.get(1, 0), 7.0);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the entry from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Returns the entry, or `None` if either index is out of bounds.
    pub fn try_get(&self, from: usize, to: usize) -> Option<f64> {
        if from < self.size && to < self.size {
            Some(self.get(from, to))
        } else {
            None
        }
    }

    /// Sets the entry from node `from` to node `to`.
    pub fn set(&mut self, from: usize, to: usize, value: f64) {
        self.data[from * self.size + to] = value;
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Travel times indexed by `(origin, destination, period)`.
///
/// Built from a sliced 3-D parameter block: one [`DistanceMatrix`] per period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodMatrix {
    slices: BTreeMap<usize, DistanceMatrix>,
}

impl PeriodMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the matrix for `period`.
    pub fn insert(&mut self, period: usize, matrix: DistanceMatrix) {
        self.slices.insert(period, matrix);
    }

    /// The matrix of one period.
    pub fn slice(&self, period: usize) -> Option<&DistanceMatrix> {
        self.slices.get(&period)
    }

    /// Travel time from `from` to `to` when departing in `period`.
    pub fn get(&self, from: usize, to: usize, period: usize) -> Option<f64> {
        self.slice(period)?.try_get(from, to)
    }

    /// Period ids in ascending order.
    pub fn periods(&self) -> impl Iterator<Item = usize> + '_ {
        self.slices.keys().copied()
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Returns `true` if no period has been added.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 5.0);
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_none());
    }

    #[test]
    fn test_set_get() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 42.0);
        assert_eq!(dm.get(0, 1), 42.0);
        assert_eq!(dm.get(1, 0), 0.0);
    }

    #[test]
    fn test_try_get_out_of_bounds() {
        let dm = DistanceMatrix::new(2);
        assert_eq!(dm.try_get(1, 1), Some(0.0));
        assert_eq!(dm.try_get(2, 0), None);
    }

    #[test]
    fn test_period_matrix() {
        let mut pm = PeriodMatrix::new();
        let mut morning = DistanceMatrix::new(2);
        morning.set(0, 1, 4.0);
        let mut evening = DistanceMatrix::new(2);
        evening.set(0, 1, 9.0);
        pm.insert(1, morning);
        pm.insert(2, evening);

        assert_eq!(pm.len(), 2);
        assert_eq!(pm.get(0, 1, 1), Some(4.0));
        assert_eq!(pm.get(0, 1, 2), Some(9.0));
        assert_eq!(pm.get(0, 1, 3), None);
        assert_eq!(pm.periods().collect::<Vec<_>>(), vec![1, 2]);
    }
}
