//! Names of the parameters an instance file must declare.

// Node vectors, indexed by node id (0 = depot).
pub const IS_CLIENT: &str = "escliente";
pub const IS_DEPOT: &str = "esdepo";
pub const IS_CRITICAL: &str = "escritico";
pub const DELIVERY: &str = "DemE";
pub const PICKUP: &str = "DemR";
pub const SERVICE_TIME: &str = "TS";
pub const EARLIEST: &str = "MinDC";
pub const LATEST: &str = "MaxDC";

// Truck vectors, indexed by truck id.
pub const CAPACITY: &str = "Cap";
pub const HOURLY_COST: &str = "CH";
pub const FIXED_COST_6H: &str = "CF6";
pub const FIXED_COST_12H: &str = "CF12";
pub const IS_HOURLY: &str = "esHora";
pub const IS_FIXED_6H: &str = "esF6";
pub const IS_FIXED_12H: &str = "esF12";

// Period vectors, indexed by period id.
pub const SPEED: &str = "v";
pub const PERIOD_START: &str = "tinic";
pub const PERIOD_END: &str = "tfin";

pub const DISTANCE: &str = "Dist";
pub const TRAVEL_TIME: &str = "tvia";

pub const DOCKS: &str = "nmuelles";
pub const SLOT_HOURS: &str = "durH";
pub const LOADING_SLOTS: &str = "Lc";
pub const LOADING_TIME: &str = "tcarga";

/// Largest accepted node id. `Dist` and `tvia` are stored dense over
/// `0..=max id`, so ids far above the node count cost quadratic memory.
pub const MAX_NODE_ID: usize = 2_000;

pub const NODE_VECTORS: [&str; 8] = [
    IS_CLIENT,
    IS_DEPOT,
    IS_CRITICAL,
    DELIVERY,
    PICKUP,
    SERVICE_TIME,
    EARLIEST,
    LATEST,
];

pub const TRUCK_VECTORS: [&str; 7] = [
    CAPACITY,
    HOURLY_COST,
    FIXED_COST_6H,
    FIXED_COST_12H,
    IS_HOURLY,
    IS_FIXED_6H,
    IS_FIXED_12H,
];

pub const PERIOD_VECTORS: [&str; 3] = [SPEED, PERIOD_START, PERIOD_END];

pub const SCALARS: [&str; 4] = [DOCKS, SLOT_HOURS, LOADING_SLOTS, LOADING_TIME];

/// Every required parameter name.
pub fn required() -> impl Iterator<Item = &'static str> {
    NODE_VECTORS
        .into_iter()
        .chain(TRUCK_VECTORS)
        .chain(PERIOD_VECTORS)
        .chain([DISTANCE, TRAVEL_TIME])
        .chain(SCALARS)
}

/// Returns `true` if `name` is part of the schema.
pub fn is_required(name: &str) -> bool {
    required().any(|required| required == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_count() {
        assert_eq!(required().count(), 24);
    }

    #[test]
    fn test_is_required() {
        assert!(is_required("tvia"));
        assert!(is_required("DemE"));
        assert!(!is_required("deme"));
        assert!(!is_required("horizon"));
    }
}
