//! Random initial populations.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::models::Instance;

use super::chromosome::{Chromosome, DEPOT};

/// Settings for [`random_population`].
///
/// # Examples
///
/// ```
/// use dock_vrp::ga::PopulationConfig;
///
/// let config = PopulationConfig::default().with_size(50).with_route_count(3);
/// assert_eq!(config.size, 50);
/// assert_eq!(config.route_count, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationConfig {
    /// Number of individuals.
    pub size: usize,
    /// Routes per individual; `None` uses the instance's truck count.
    pub route_count: Option<usize>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 20,
            route_count: None,
        }
    }
}

impl PopulationConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_route_count(mut self, route_count: usize) -> Self {
        self.route_count = Some(route_count);
        self
    }
}

/// Generates `config.size` random valid chromosomes.
///
/// Each individual is a uniformly shuffled client permutation cut into
/// `R = min(max(route_count, 1), n)` routes of near-equal length; the first
/// `n % R` routes get one extra client.
pub fn random_population<R>(
    instance: &Instance,
    config: &PopulationConfig,
    rng: &mut R,
) -> Vec<Chromosome>
where
    R: Rng + ?Sized,
{
    let mut clients: Vec<usize> = instance.client_ids().collect();
    let routes = config
        .route_count
        .unwrap_or(instance.num_trucks())
        .max(1)
        .min(clients.len().max(1));

    debug!(
        size = config.size,
        clients = clients.len(),
        routes,
        "generating random population"
    );

    (0..config.size)
        .map(|_| {
            clients.shuffle(rng);
            split_evenly(&clients, routes)
        })
        .collect()
}

fn split_evenly(clients: &[usize], routes: usize) -> Chromosome {
    let base = clients.len() / routes;
    let extra = clients.len() % routes;

    let mut genes = Vec::with_capacity(clients.len() + routes + 1);
    genes.push(DEPOT);
    let mut start = 0;
    for r in 0..routes {
        let len = base + usize::from(r < extra);
        if len == 0 {
            continue;
        }
        genes.extend_from_slice(&clients[start..start + len]);
        genes.push(DEPOT);
        start += len;
    }
    Chromosome::new(genes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{decode, validate};
    use crate::test_utils::{instance_with_clients, sample_instance};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_config() {
        let config = PopulationConfig::default();
        assert_eq!(config.size, 20);
        assert_eq!(config.route_count, None);
    }

    #[test]
    fn test_population_is_valid() {
        let inst = sample_instance();
        let mut rng = StdRng::seed_from_u64(42);
        let population = random_population(&inst, &PopulationConfig::default(), &mut rng);
        assert_eq!(population.len(), 20);
        for c in &population {
            assert_eq!(validate(c, &inst), Ok(()));
            // 5 clients over 2 trucks
            let lengths: Vec<usize> = decode(c).iter().map(Vec::len).collect();
            assert_eq!(lengths, vec![3, 2]);
        }
    }

    #[test]
    fn test_route_count_override() {
        let inst = instance_with_clients(10);
        let config = PopulationConfig::default().with_size(5).with_route_count(4);
        let mut rng = StdRng::seed_from_u64(1);
        for c in random_population(&inst, &config, &mut rng) {
            let lengths: Vec<usize> = decode(&c).iter().map(Vec::len).collect();
            assert_eq!(lengths, vec![3, 3, 2, 2]);
        }
    }

    #[test]
    fn test_more_routes_than_clients() {
        let inst = instance_with_clients(3);
        let config = PopulationConfig::default().with_size(3).with_route_count(8);
        let mut rng = StdRng::seed_from_u64(1);
        for c in random_population(&inst, &config, &mut rng) {
            assert_eq!(c.route_count(), 3);
            assert_eq!(validate(&c, &inst), Ok(()));
        }
    }

    #[test]
    fn test_zero_routes_means_one() {
        let inst = instance_with_clients(4);
        let config = PopulationConfig::default().with_size(1).with_route_count(0);
        let mut rng = StdRng::seed_from_u64(1);
        let population = random_population(&inst, &config, &mut rng);
        assert_eq!(population[0].route_count(), 1);
    }

    #[test]
    fn test_no_clients() {
        let inst = instance_with_clients(0);
        let mut rng = StdRng::seed_from_u64(1);
        let population = random_population(&inst, &PopulationConfig::default(), &mut rng);
        assert!(population.iter().all(|c| c.genes() == [DEPOT]));
    }

    #[test]
    fn test_population_is_deterministic() {
        let inst = sample_instance();
        let config = PopulationConfig::default().with_size(8);
        let a = random_population(&inst, &config, &mut StdRng::seed_from_u64(5));
        let b = random_population(&inst, &config, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
