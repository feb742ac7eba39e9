//! Truck type with capacity and tariff parameters.

use serde::{Deserialize, Serialize};

/// Which cost schemes a truck may be hired under (`esHora`, `esF6`, `esF12`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tariff {
    pub hourly: bool,
    pub fixed_6h: bool,
    pub fixed_12h: bool,
}

impl Default for Tariff {
    /// Hourly only, the scheme assumed when a truck has no flags.
    fn default() -> Self {
        Self {
            hourly: true,
            fixed_6h: false,
            fixed_12h: false,
        }
    }
}

/// A truck of the fleet.
///
/// # Examples
///
/// ```
/// use dock_vrp::models::Truck;
///
/// let t = Truck::new(1, 20.0).with_hourly_cost(25.0).with_fixed_costs(120.0, 200.0);
/// assert_eq!(t.id(), 1);
/// assert_eq!(t.capacity(), 20.0);
/// assert!(t.tariff().hourly);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    id: usize,
    capacity: f64,
    hourly_cost: f64,
    fixed_cost_6h: f64,
    fixed_cost_12h: f64,
    tariff: Tariff,
}

impl Truck {
    /// Creates a truck with the given id and capacity.
    ///
    /// Default: zero costs, hourly tariff.
    pub fn new(id: usize, capacity: f64) -> Self {
        Self {
            id,
            capacity,
            hourly_cost: 0.0,
            fixed_cost_6h: 0.0,
            fixed_cost_12h: 0.0,
            tariff: Tariff::default(),
        }
    }

    /// Sets the cost per hour (`CH`).
    pub fn with_hourly_cost(mut self, cost: f64) -> Self {
        self.hourly_cost = cost;
        self
    }

    /// Sets the 6-hour and 12-hour flat rates (`CF6`, `CF12`).
    pub fn with_fixed_costs(mut self, six_hours: f64, twelve_hours: f64) -> Self {
        self.fixed_cost_6h = six_hours;
        self.fixed_cost_12h = twelve_hours;
        self
    }

    pub fn with_tariff(mut self, tariff: Tariff) -> Self {
        self.tariff = tariff;
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load (`Cap`).
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn hourly_cost(&self) -> f64 {
        self.hourly_cost
    }

    pub fn fixed_cost_6h(&self) -> f64 {
        self.fixed_cost_6h
    }

    pub fn fixed_cost_12h(&self) -> f64 {
        self.fixed_cost_12h
    }

    pub fn tariff(&self) -> Tariff {
        self.tariff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truck_new() {
        let t = Truck::new(2, 15.0);
        assert_eq!(t.id(), 2);
        assert_eq!(t.capacity(), 15.0);
        assert_eq!(t.hourly_cost(), 0.0);
        assert_eq!(t.tariff(), Tariff::default());
    }

    #[test]
    fn test_truck_builder() {
        let tariff = Tariff {
            hourly: false,
            fixed_6h: true,
            fixed_12h: false,
        };
        let t = Truck::new(1, 20.0)
            .with_hourly_cost(25.0)
            .with_fixed_costs(120.0, 200.0)
            .with_tariff(tariff);
        assert_eq!(t.hourly_cost(), 25.0);
        assert_eq!(t.fixed_cost_6h(), 120.0);
        assert_eq!(t.fixed_cost_12h(), 200.0);
        assert!(t.tariff().fixed_6h);
        assert!(!t.tariff().hourly);
    }
}
