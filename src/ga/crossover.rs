//! Crossover operators.
//!
//! Both operators keep part of the first parent and fill the remaining
//! clients in the visiting order of the second parent. The child's route
//! count may differ from both parents.

use std::collections::HashSet;

use rand::Rng;

use crate::models::Instance;

use super::chromosome::{Chromosome, DEPOT};
use super::codec::{decode, encode, validate};
use super::error::StructuralError;

/// Route-based crossover (RBX).
///
/// Picks one route of `a` uniformly at random and places it first, then
/// appends the routes of `b` with the donated clients removed. Routes of `b`
/// left empty are dropped.
///
/// Both parents are validated first; the child is always valid.
///
/// # Examples
///
/// ```
/// use dock_vrp::ga::{decode, rbx, Chromosome};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// # let instance = dock_vrp::load_instance_from_str(concat!(
/// #     "param escliente := 0 0 1 1 2 1 3 1 ; param esdepo := 0 1 ; param escritico := 1 0 ;",
/// #     "param DemE := 0 0 1 1 2 1 3 1 ; param DemR := 1 0 ; param TS := 1 0 ;",
/// #     "param MinDC := 1 0 2 0 3 0 ; param MaxDC := 1 24 2 24 3 24 ;",
/// #     "param Cap := 1 10 ; param CH := 1 1 ; param CF6 := 1 1 ; param CF12 := 1 1 ;",
/// #     "param esHora := 1 1 ; param esF6 := 1 0 ; param esF12 := 1 0 ;",
/// #     "param v := 1 1 ; param tinic := 1 0 ; param tfin := 1 24 ;",
/// #     "param Dist : 0 1 2 3 := 0 0 1 1 1 1 1 0 1 1 2 1 1 0 1 3 1 1 1 0 ;",
/// #     "param tvia [*,*,1]: 0 1 2 3 := 0 0 1 1 1 1 1 0 1 1 2 1 1 0 1 3 1 1 1 0 ;",
/// #     "param nmuelles := 1 ; param durH := 1 ; param Lc := 1 ; param tcarga := 1 ;",
/// # )).unwrap();
/// let a = Chromosome::new(vec![0, 1, 0, 2, 3, 0]);
/// let b = Chromosome::new(vec![0, 3, 2, 1, 0]);
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let child = rbx(&instance, &a, &b, &mut rng).unwrap();
/// let first = decode(&child).remove(0);
/// assert!(first == vec![1] || first == vec![2, 3]);
/// ```
pub fn rbx<R>(
    instance: &Instance,
    a: &Chromosome,
    b: &Chromosome,
    rng: &mut R,
) -> Result<Chromosome, StructuralError>
where
    R: Rng + ?Sized,
{
    validate(a, instance)?;
    validate(b, instance)?;

    let mut routes = decode(a);
    if routes.is_empty() {
        return Ok(a.clone());
    }
    let donor = routes.swap_remove(rng.random_range(0..routes.len()));
    let placed: HashSet<usize> = donor.iter().copied().collect();

    let mut child = vec![donor];
    child.extend(
        decode(b)
            .into_iter()
            .map(|route| unplaced(route, &placed)),
    );
    Ok(encode(&child))
}

/// Cut-and-fill crossover.
///
/// Draws a cut among the `n` clients of `a`, keeps `a` up to and including
/// its `cut`-th client (0-based, route boundaries included), closes that
/// route, then appends the routes of `b` without the kept clients.
///
/// With no clients, returns a copy of `a`.
pub fn cut_and_fill<R>(
    instance: &Instance,
    a: &Chromosome,
    b: &Chromosome,
    rng: &mut R,
) -> Result<Chromosome, StructuralError>
where
    R: Rng + ?Sized,
{
    validate(a, instance)?;
    validate(b, instance)?;

    let n = a.client_count();
    if n == 0 {
        return Ok(a.clone());
    }
    let cut = rng.random_range(0..n);
    let Some(end) = a
        .genes()
        .iter()
        .enumerate()
        .filter(|&(_, &gene)| gene != DEPOT)
        .map(|(i, _)| i)
        .nth(cut)
    else {
        return Ok(a.clone());
    };

    let mut genes = a.genes()[..=end].to_vec();
    genes.push(DEPOT);
    let placed: HashSet<usize> = genes.iter().copied().filter(|&g| g != DEPOT).collect();

    for route in decode(b) {
        let route = unplaced(route, &placed);
        if !route.is_empty() {
            genes.extend(route);
            genes.push(DEPOT);
        }
    }
    Ok(Chromosome::new(genes))
}

fn unplaced(route: Vec<usize>, placed: &HashSet<usize>) -> Vec<usize> {
    route.into_iter().filter(|c| !placed.contains(c)).collect()
}
