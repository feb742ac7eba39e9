//! The immutable problem instance.

use std::collections::BTreeMap;

use crate::distance::{DistanceMatrix, PeriodMatrix};
use crate::parser::ParamValue;

use super::{Client, DockSettings, Period, Truck};

/// A loaded problem instance.
///
/// Built once by [`build_instance`](crate::instance::build_instance) (or
/// [`load_instance`](crate::load_instance)) and read-only afterwards. Contains
/// only owned data, so it can be shared by reference across threads.
///
/// Clients are sorted by id and never include the depot (`0`). Matrices are
/// dense and indexed by node id.
#[derive(Debug, Clone)]
pub struct Instance {
    pub(crate) clients: Vec<Client>,
    pub(crate) trucks: Vec<Truck>,
    pub(crate) periods: Vec<Period>,
    pub(crate) docks: DockSettings,
    pub(crate) distances: DistanceMatrix,
    pub(crate) travel_times: PeriodMatrix,
    pub(crate) extra: BTreeMap<String, ParamValue>,
}

impl Instance {
    /// All clients, sorted by id.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Client ids in ascending order.
    pub fn client_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.clients.iter().map(Client::id)
    }

    /// Looks up a client by id.
    pub fn client(&self, id: usize) -> Option<&Client> {
        self.clients
            .binary_search_by_key(&id, Client::id)
            .ok()
            .map(|pos| &self.clients[pos])
    }

    /// Returns `true` if `id` names a client of this instance.
    pub fn is_client(&self, id: usize) -> bool {
        self.client(id).is_some()
    }

    /// Number of clients (depot excluded).
    pub fn num_clients(&self) -> usize {
        self.clients.len()
    }

    /// The fleet, sorted by id.
    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }

    pub fn num_trucks(&self) -> usize {
        self.trucks.len()
    }

    /// Periods of the day, sorted by id.
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn docks(&self) -> &DockSettings {
        &self.docks
    }

    /// Distance matrix (`Dist`).
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Travel time by period (`tvia`).
    pub fn travel_times(&self) -> &PeriodMatrix {
        &self.travel_times
    }

    /// A parameter declared in the file but not used to build the instance.
    pub fn extra(&self, name: &str) -> Option<&ParamValue> {
        self.extra.get(name)
    }

    /// Distance of depot → `route` → depot.
    ///
    /// # Panics
    ///
    /// Panics if a route entry is not a node of the distance matrix.
    pub fn route_distance(&self, route: &[usize]) -> f64 {
        let mut total = 0.0;
        let mut prev = 0;
        for &id in route {
            total += self.distances.get(prev, id);
            prev = id;
        }
        if !route.is_empty() {
            total += self.distances.get(prev, 0);
        }
        total
    }

    /// Total `(delivery, pickup)` demand of the clients on `route`.
    ///
    /// Ids that are not clients contribute nothing.
    pub fn route_demand(&self, route: &[usize]) -> (f64, f64) {
        route
            .iter()
            .filter_map(|&id| self.client(id))
            .fold((0.0, 0.0), |(delivery, pickup), c| {
                (delivery + c.delivery(), pickup + c.pickup())
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::sample_instance;

    #[test]
    fn test_client_lookup() {
        let inst = sample_instance();
        assert_eq!(inst.num_clients(), 5);
        assert_eq!(inst.client_ids().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(inst.client(3).map(|c| c.delivery()), Some(3.0));
        assert!(inst.client(0).is_none());
        assert!(!inst.is_client(6));
    }

    #[test]
    fn test_route_distance() {
        let inst = sample_instance();
        // 0→1 = 5, 1→2 = 3, 2→0 = 9
        assert_eq!(inst.route_distance(&[1, 2]), 17.0);
        assert_eq!(inst.route_distance(&[]), 0.0);
    }

    #[test]
    fn test_route_demand() {
        let inst = sample_instance();
        assert_eq!(inst.route_demand(&[1, 3]), (9.0, 3.0));
    }

    #[test]
    fn test_instance_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<super::Instance>();
    }
}
