//! Instance construction and validation.
//!
//! Maps a parsed [`ParamSet`](crate::parser::ParamSet) onto the typed
//! [`Instance`](crate::models::Instance) model. Validation gathers every
//! problem it can find into a single [`ValidationError`] instead of stopping
//! at the first one.

mod builder;
pub mod schema;
mod violation;

pub use builder::build_instance;
pub use violation::{IndexSpace, ParamIndex, ValidationError, Violation, ViolationKind};
