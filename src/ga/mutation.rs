//! Mutation operators.

use rand::Rng;

use crate::models::Instance;

use super::chromosome::{Chromosome, DEPOT};
use super::codec::{client_positions, validate};
use super::error::StructuralError;

/// Exchanges two distinct clients chosen uniformly at random.
///
/// Depot positions and route lengths are unchanged. With fewer than two
/// clients, returns a copy of `chromosome`.
pub fn swap_mutate<R>(
    instance: &Instance,
    chromosome: &Chromosome,
    rng: &mut R,
) -> Result<Chromosome, StructuralError>
where
    R: Rng + ?Sized,
{
    validate(chromosome, instance)?;

    let positions = client_positions(chromosome.genes());
    let n = positions.len();
    if n < 2 {
        return Ok(chromosome.clone());
    }

    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }

    let mut genes = chromosome.genes().to_vec();
    genes.swap(positions[i], positions[j]);
    Ok(Chromosome::new(genes))
}

/// Moves one client to a new place.
///
/// Removes the client at a uniformly chosen position and reinserts it before
/// a uniformly chosen gene of what remains, other than the leading depot. The
/// target may be a client or the depot closing a route, so the client can land
/// anywhere in any route, including its last slot. A route emptied by the
/// removal disappears unless the client goes straight back into it. With fewer
/// than two clients, returns a copy of `chromosome`.
///
/// # Examples
///
/// ```
/// use dock_vrp::ga::{insert_mutate, Chromosome};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// # let instance = dock_vrp::load_instance_from_str(concat!(
/// #     "param escliente := 0 0 1 1 2 1 ; param esdepo := 0 1 ; param escritico := 1 0 ;",
/// #     "param DemE := 0 0 1 1 2 1 ; param DemR := 1 0 ; param TS := 1 0 ;",
/// #     "param MinDC := 1 0 2 0 ; param MaxDC := 1 24 2 24 ;",
/// #     "param Cap := 1 10 ; param CH := 1 1 ; param CF6 := 1 1 ; param CF12 := 1 1 ;",
/// #     "param esHora := 1 1 ; param esF6 := 1 0 ; param esF12 := 1 0 ;",
/// #     "param v := 1 1 ; param tinic := 1 0 ; param tfin := 1 24 ;",
/// #     "param Dist : 0 1 2 := 0 0 1 1 1 1 0 1 2 1 1 0 ;",
/// #     "param tvia [*,*,1]: 0 1 2 := 0 0 1 1 1 1 0 1 2 1 1 0 ;",
/// #     "param nmuelles := 1 ; param durH := 1 ; param Lc := 1 ; param tcarga := 1 ;",
/// # )).unwrap();
/// let c = Chromosome::new(vec![0, 1, 0, 2, 0]);
/// let mut rng = StdRng::seed_from_u64(0);
/// let child = insert_mutate(&instance, &c, &mut rng).unwrap();
/// assert_eq!(child.client_count(), 2);
/// assert!(child.route_count() <= 2);
/// ```
pub fn insert_mutate<R>(
    instance: &Instance,
    chromosome: &Chromosome,
    rng: &mut R,
) -> Result<Chromosome, StructuralError>
where
    R: Rng + ?Sized,
{
    validate(chromosome, instance)?;

    let positions = client_positions(chromosome.genes());
    let n = positions.len();
    if n < 2 {
        return Ok(chromosome.clone());
    }

    let mut genes = chromosome.genes().to_vec();
    let client = genes.remove(positions[rng.random_range(0..n)]);

    // the leading depot stays first; index len() is past the closing depot
    let before = rng.random_range(1..genes.len());
    genes.insert(before, client);

    // an emptied route leaves two adjacent depots
    genes.dedup_by(|a, b| *a == DEPOT && *b == DEPOT);
    Ok(Chromosome::new(genes))
}
