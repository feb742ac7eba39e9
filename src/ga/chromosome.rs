//! Depot-delimited chromosome.
//!
//! A chromosome encodes a complete routing plan as one flat sequence of node
//! ids where [`DEPOT`] separates consecutive routes:
//!
//! ```text
//! 0 7 9 10 8 0 6 4 1 0 5 2 3 0   →   [7 9 10 8] [6 4 1] [5 2 3]
//! ```

use serde::{Deserialize, Serialize};

/// Sentinel gene separating routes.
pub const DEPOT: usize = 0;

/// A candidate solution as a depot-delimited sequence of client ids.
///
/// A structurally valid chromosome starts and ends with [`DEPOT`], has no two
/// adjacent depots, and visits every client of its instance exactly once (see
/// [`validate`](super::validate)). The type itself does not enforce this:
/// operators take chromosomes by reference and always return new ones.
///
/// # Examples
///
/// ```
/// use dock_vrp::ga::Chromosome;
///
/// let c = Chromosome::new(vec![0, 3, 1, 0, 2, 0]);
/// assert_eq!(c.route_count(), 2);
/// assert_eq!(c.client_count(), 3);
/// assert_eq!(c.locate(2), Some((1, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chromosome {
    genes: Vec<usize>,
}

impl Chromosome {
    pub fn new(genes: Vec<usize>) -> Self {
        Self { genes }
    }

    /// The raw gene sequence, sentinels included.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    pub fn into_genes(self) -> Vec<usize> {
        self.genes
    }

    /// Number of genes, sentinels included.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Client ids in visiting order.
    pub fn clients(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes.iter().copied().filter(|&g| g != DEPOT)
    }

    pub fn client_count(&self) -> usize {
        self.clients().count()
    }

    /// Number of routes: depot count minus one.
    pub fn route_count(&self) -> usize {
        self.genes
            .iter()
            .filter(|&&g| g == DEPOT)
            .count()
            .saturating_sub(1)
    }

    /// Finds `(route index, position within route)` of `client`.
    ///
    /// Positions count from the first client of a route. Genes before the
    /// first sentinel belong to route 0.
    pub fn locate(&self, client: usize) -> Option<(usize, usize)> {
        if client == DEPOT {
            return None;
        }
        let mut route = 0;
        let mut pos = 0;
        let mut started = false;
        for &gene in &self.genes {
            if gene == DEPOT {
                if started {
                    route += 1;
                }
                started = true;
                pos = 0;
                continue;
            }
            if gene == client {
                return Some((route, pos));
            }
            started = true;
            pos += 1;
        }
        None
    }
}

impl From<Vec<usize>> for Chromosome {
    fn from(genes: Vec<usize>) -> Self {
        Self::new(genes)
    }
}
