//! Conversion between chromosomes and route lists, and structural checks.

use std::collections::HashSet;

use crate::models::Instance;

use super::chromosome::{Chromosome, DEPOT};
use super::error::StructuralError;

/// Splits a chromosome into its routes.
///
/// Empty segments (adjacent or missing sentinels) produce no route.
///
/// # Examples
///
/// ```
/// use dock_vrp::ga::{decode, Chromosome};
///
/// let c = Chromosome::new(vec![0, 7, 9, 10, 8, 0, 6, 4, 1, 0, 5, 2, 3, 0]);
/// assert_eq!(decode(&c), vec![vec![7, 9, 10, 8], vec![6, 4, 1], vec![5, 2, 3]]);
/// ```
pub fn decode(chromosome: &Chromosome) -> Vec<Vec<usize>> {
    chromosome
        .genes()
        .split(|&gene| gene == DEPOT)
        .filter(|segment| !segment.is_empty())
        .map(<[usize]>::to_vec)
        .collect()
}

/// Joins routes into a chromosome, opening and closing each with the depot.
///
/// Empty routes are skipped; no routes at all gives `[0]`.
///
/// # Examples
///
/// ```
/// use dock_vrp::ga::encode;
///
/// let c = encode(&[vec![2, 1], vec![], vec![3]]);
/// assert_eq!(c.genes(), &[0, 2, 1, 0, 3, 0]);
/// assert_eq!(encode(&[]).genes(), &[0]);
/// ```
pub fn encode(routes: &[Vec<usize>]) -> Chromosome {
    let mut genes = Vec::with_capacity(routes.iter().map(|r| r.len() + 1).sum::<usize>() + 1);
    genes.push(DEPOT);
    for route in routes.iter().filter(|route| !route.is_empty()) {
        genes.extend_from_slice(route);
        genes.push(DEPOT);
    }
    Chromosome::new(genes)
}

/// Checks that `chromosome` is a structurally valid plan for `instance`.
///
/// It must start and end with the depot, contain no adjacent depots, and
/// visit each client of the instance exactly once with no other ids. Genes
/// are scanned left to right and the first defect is returned; missing
/// clients are reported last, smallest id first.
///
/// Capacity, time windows and dock availability are not checked.
pub fn validate(chromosome: &Chromosome, instance: &Instance) -> Result<(), StructuralError> {
    let genes = chromosome.genes();
    match (genes.first(), genes.last()) {
        (None, _) | (_, None) => return Err(StructuralError::Empty),
        (Some(&first), _) if first != DEPOT => return Err(StructuralError::MissingLeadingDepot),
        (_, Some(&last)) if last != DEPOT => return Err(StructuralError::MissingTrailingDepot),
        _ => {}
    }

    let mut seen = HashSet::with_capacity(instance.num_clients());
    for (position, &gene) in genes.iter().enumerate() {
        if gene == DEPOT {
            if position > 0 && genes[position - 1] == DEPOT {
                return Err(StructuralError::EmptyRoute { position });
            }
            continue;
        }
        if !instance.is_client(gene) {
            return Err(StructuralError::UnknownClient {
                client: gene,
                position,
            });
        }
        if !seen.insert(gene) {
            return Err(StructuralError::DuplicateClient {
                client: gene,
                position,
            });
        }
    }

    match instance.client_ids().find(|id| !seen.contains(id)) {
        Some(client) => Err(StructuralError::MissingClient { client }),
        None => Ok(()),
    }
}

/// Gene indices holding clients.
pub(crate) fn client_positions(genes: &[usize]) -> Vec<usize> {
    genes
        .iter()
        .enumerate()
        .filter(|&(_, &gene)| gene != DEPOT)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{arb_chromosome, instance_with_clients, sample_instance};
    use proptest::prelude::*;

    #[test]
    fn test_decode_three_routes() {
        let c = Chromosome::new(vec![0, 7, 9, 10, 8, 0, 6, 4, 1, 0, 5, 2, 3, 0]);
        assert_eq!(
            decode(&c),
            vec![vec![7, 9, 10, 8], vec![6, 4, 1], vec![5, 2, 3]]
        );
    }

    #[test]
    fn test_decode_drops_empty_segments() {
        let c = Chromosome::new(vec![0, 0, 3, 0, 0, 1, 0]);
        assert_eq!(decode(&c), vec![vec![3], vec![1]]);
        assert!(decode(&Chromosome::new(vec![0])).is_empty());
    }

    #[test]
    fn test_encode() {
        let c = encode(&[vec![7, 9], vec![6]]);
        assert_eq!(c.genes(), &[0, 7, 9, 0, 6, 0]);
    }

    #[test]
    fn test_validate_accepts_valid() {
        let inst = sample_instance();
        let c = Chromosome::new(vec![0, 3, 1, 0, 5, 2, 4, 0]);
        assert_eq!(validate(&c, &inst), Ok(()));
    }

    #[test]
    fn test_validate_zero_clients() {
        let inst = instance_with_clients(0);
        assert_eq!(validate(&Chromosome::new(vec![0]), &inst), Ok(()));
        assert_eq!(
            validate(&Chromosome::new(vec![]), &inst),
            Err(StructuralError::Empty)
        );
    }

    #[test]
    fn test_validate_sentinels() {
        let inst = sample_instance();
        assert_eq!(
            validate(&Chromosome::new(vec![1, 2, 3, 4, 5, 0]), &inst),
            Err(StructuralError::MissingLeadingDepot)
        );
        assert_eq!(
            validate(&Chromosome::new(vec![0, 1, 2, 3, 4, 5]), &inst),
            Err(StructuralError::MissingTrailingDepot)
        );
    }

    #[test]
    fn test_validate_empty_route() {
        let inst = sample_instance();
        let c = Chromosome::new(vec![0, 1, 2, 0, 0, 3, 4, 5, 0]);
        assert_eq!(
            validate(&c, &inst),
            Err(StructuralError::EmptyRoute { position: 4 })
        );
    }

    #[test]
    fn test_validate_unknown_and_duplicate() {
        let inst = sample_instance();
        assert_eq!(
            validate(&Chromosome::new(vec![0, 1, 2, 9, 3, 4, 5, 0]), &inst),
            Err(StructuralError::UnknownClient {
                client: 9,
                position: 3
            })
        );
        assert_eq!(
            validate(&Chromosome::new(vec![0, 1, 2, 0, 2, 3, 4, 5, 0]), &inst),
            Err(StructuralError::DuplicateClient {
                client: 2,
                position: 4
            })
        );
    }

    #[test]
    fn test_validate_missing_client() {
        let inst = sample_instance();
        let c = Chromosome::new(vec![0, 1, 2, 0, 5, 0]);
        assert_eq!(
            validate(&c, &inst),
            Err(StructuralError::MissingClient { client: 3 })
        );
    }

    #[test]
    fn test_client_positions() {
        assert_eq!(client_positions(&[0, 4, 2, 0, 1, 0]), vec![1, 2, 4]);
    }

    proptest! {
        #[test]
        fn prop_round_trip((n, c) in (0usize..15).prop_flat_map(|n| (Just(n), arb_chromosome(n)))) {
            let routes = decode(&c);
            prop_assert_eq!(decode(&encode(&routes)), routes.clone());
            prop_assert_eq!(encode(&routes), c.clone());
            prop_assert_eq!(validate(&c, &instance_with_clients(n)), Ok(()));
        }
    }
}
