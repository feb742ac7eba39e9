//! Parser for AMPL-style `.dat` parameter files.
//!
//! Accepts exactly four block shapes and rejects anything else:
//!
//! - scalar: `param NAME := value ;`
//! - vector: `param NAME := i1 v1 i2 v2 ... ;`
//! - matrix: `param NAME : c1 ... cK := r1 v11 ... v1K r2 ... ;`
//! - sliced 3-D: `param NAME [*,*,f]: c1 ... cK := rows ;`, repeated per `f`
//!
//! `#` starts a comment running to the end of the line.

mod error;
mod reader;
mod token;
mod value;

pub use error::ParseError;
pub use reader::{parse_into, parse_str};
pub use value::{ParamSet, ParamValue, Shape, Table, Vector};
