//! Genetic algorithm components for dock-constrained routing.
//!
//! - [`Chromosome`]: depot-delimited sequence of client ids
//! - [`decode`] / [`encode`] / [`validate`]: codec and structural checks
//! - [`rbx`] / [`cut_and_fill`]: crossover
//! - [`swap_mutate`] / [`insert_mutate`]: mutation
//! - [`random_population`]: random initial population
//!
//! Every operator validates its inputs, never modifies them, and returns a
//! structurally valid child. Randomness comes from the caller's generator, so
//! a seeded [`StdRng`](rand::rngs::StdRng) gives reproducible results.

mod chromosome;
mod codec;
mod crossover;
mod error;
mod mutation;
mod population;

pub use chromosome::{Chromosome, DEPOT};
pub use codec::{decode, encode, validate};
pub use crossover::{cut_and_fill, rbx};
pub use error::StructuralError;
pub use mutation::{insert_mutate, swap_mutate};
pub use population::{random_population, PopulationConfig};
