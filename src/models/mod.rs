//! Domain model types for the dock-constrained routing problem.
//!
//! Provides clients with demands and time windows, trucks with capacity and
//! tariffs, periods of the day, dock settings, and the immutable
//! [`Instance`] that ties them together.

mod client;
mod instance;
mod period;
mod truck;

pub use client::{Client, TimeWindow};
pub use instance::Instance;
pub use period::{DockSettings, Period};
pub use truck::{Tariff, Truck};
