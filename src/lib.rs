//! # dock-vrp
//!
//! Building blocks for a genetic search over a vehicle routing problem with
//! time windows and loading-dock assignment: an AMPL `.dat` instance loader,
//! a depot-delimited chromosome codec, and structure-preserving operators.
//!
//! ## Modules
//!
//! - [`parser`]: AMPL parameter blocks (scalar, vector, matrix, sliced 3-D)
//! - [`instance`]: parameter schema, instance builder and validator
//! - [`models`]: clients, trucks, periods, dock settings, [`Instance`]
//! - [`distance`]: dense distance and period-sliced travel time matrices
//! - [`ga`]: chromosome codec, crossover, mutation and population init
//!
//! ## Example
//!
//! ```
//! use dock_vrp::ga::{decode, validate, Chromosome};
//!
//! let text = "
//! param escliente := 0 0 1 1 2 1 ; param esdepo := 0 1 ; param escritico := 1 0 ;
//! param DemE := 0 0 1 6 2 4 ; param DemR := 1 0 2 0 ; param TS := 1 0 2 0 ;
//! param MinDC := 1 8 2 8 ; param MaxDC := 1 12 2 12 ;
//! param Cap := 1 10 ; param CH := 1 20 ; param CF6 := 1 100 ; param CF12 := 1 150 ;
//! param esHora := 1 1 ; param esF6 := 1 0 ; param esF12 := 1 0 ;
//! param v := 1 40 ; param tinic := 1 6 ; param tfin := 1 18 ;
//! param Dist : 0 1 2 := 0 0 5 9 1 5 0 3 2 9 3 0 ;
//! param tvia [*,*,1]: 0 1 2 := 0 0 5 9 1 5 0 3 2 9 3 0 ;
//! param nmuelles := 1 ; param durH := 0.25 ; param Lc := 2 ; param tcarga := 1 ;
//! ";
//! let instance = dock_vrp::load_instance_from_str(text).unwrap();
//! assert_eq!(instance.client_ids().collect::<Vec<_>>(), vec![1, 2]);
//!
//! let chromosome = Chromosome::new(vec![0, 2, 0, 1, 0]);
//! validate(&chromosome, &instance).unwrap();
//! assert_eq!(decode(&chromosome), vec![vec![2], vec![1]]);
//! ```

pub mod distance;
pub mod error;
pub mod ga;
pub mod instance;
pub mod models;
pub mod parser;

#[cfg(test)]
pub(crate) mod test_utils;

use std::fs;
use std::path::Path;

use tracing::debug;

pub use error::LoadError;
pub use models::Instance;

use parser::ParamSet;

/// Loads an instance from one or more `.dat` files.
///
/// Every file is parsed into one parameter set, so a parameter declared in
/// two files is a [`ParseError::Duplicate`](parser::ParseError::Duplicate)
/// reported against the second file. The merged set is then validated.
pub fn load_instance<P: AsRef<Path>>(paths: &[P]) -> Result<Instance, LoadError> {
    let mut params = ParamSet::new();
    for path in paths {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parser::parse_into(&text, &mut params).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), params = params.len(), "read instance file");
    }
    Ok(instance::build_instance(&params)?)
}

/// Loads an instance from in-memory `.dat` text.
pub fn load_instance_from_str(text: &str) -> Result<Instance, LoadError> {
    let params = parser::parse_str(text).map_err(|source| LoadError::Parse {
        path: "<memory>".into(),
        source,
    })?;
    Ok(instance::build_instance(&params)?)
}
