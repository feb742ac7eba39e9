//! Shared fixtures for unit tests.

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::distance::{DistanceMatrix, PeriodMatrix};
use crate::ga::{encode, Chromosome};
use crate::instance::build_instance;
use crate::models::{Client, DockSettings, Instance, Period, TimeWindow, Truck};
use crate::parser::parse_str;

/// Depot 0, five clients, two trucks, two periods.
pub const SAMPLE_DAT: &str = "\
# nodes
param escliente := 0 0 1 1 2 1 3 1 4 1 5 1 ;
param esdepo := 0 1 ;
param escritico := 3 1 ;
param DemE := 0 0 1 6 2 4 3 3 4 5 5 2 ;
param DemR := 1 1 2 0 3 2 4 0 5 1 ;
param TS := 1 0.25 2 0.25 3 0.5 4 0.25 5 0.5 ;
param MinDC := 1 8 2 8 3 9 4 10 5 8 ;
param MaxDC := 1 12 2 14 3 11 4 16 5 18 ;

# trucks
param Cap := 1 20 2 15 ;
param CH := 1 25 2 20 ;
param CF6 := 1 120 2 100 ;
param CF12 := 1 200 2 170 ;
param esHora := 1 1 2 0 ;
param esF6 := 1 0 2 1 ;
param esF12 := 1 0 2 0 ;

# periods
param v := 1 40 2 25 ;
param tinic := 1 6 2 9 ;
param tfin := 1 9 2 18 ;

param Dist : 0 1 2 3 4 5 :=
0 0 5 9 4 7 3
1 5 0 3 6 2 8
2 9 3 0 5 4 6
3 4 6 5 0 3 2
4 7 2 4 3 0 5
5 3 8 6 2 5 0
;

param tvia [*,*,1]: 0 1 2 3 4 5 :=
0 0 5 9 4 7 3
1 5 0 3 6 2 8
2 9 3 0 5 4 6
3 4 6 5 0 3 2
4 7 2 4 3 0 5
5 3 8 6 2 5 0
;

param tvia [*,*,2]: 0 1 2 3 4 5 :=
0 0 7.5 13.5 6 10.5 4.5
1 7.5 0 4.5 9 3 12
2 13.5 4.5 0 7.5 6 9
3 6 9 7.5 0 4.5 3
4 10.5 3 6 4.5 0 7.5
5 4.5 12 9 3 7.5 0
;

# docks
param nmuelles := 2 ;
param durH := 0.166 ;
param Lc := 3 ;
param tcarga := 1 ;
";

/// The instance described by [`SAMPLE_DAT`].
pub fn sample_instance() -> Instance {
    let params = parse_str(SAMPLE_DAT).expect("sample parses");
    build_instance(&params).expect("sample is valid")
}

/// An instance with clients `1..=n`, two trucks and zero distances.
pub fn instance_with_clients(n: usize) -> Instance {
    let window = TimeWindow::new(0.0, 24.0).expect("valid window");
    Instance {
        clients: (1..=n)
            .map(|id| Client::new(id, 1.0, 0.0, 0.0, window))
            .collect(),
        trucks: vec![Truck::new(1, 10.0), Truck::new(2, 10.0)],
        periods: vec![Period::new(1, 0.0, 24.0, 40.0)],
        docks: DockSettings {
            docks: 1,
            slot_hours: 0.25,
            loading_slots: 2,
            loading_time: 1.0,
        },
        distances: DistanceMatrix::new(n + 1),
        travel_times: PeriodMatrix::new(),
        extra: BTreeMap::new(),
    }
}

/// Valid chromosomes over clients `1..=n` with a random route split.
pub fn arb_chromosome(n: usize) -> impl Strategy<Value = Chromosome> {
    (
        Just((1..=n).collect::<Vec<usize>>()).prop_shuffle(),
        proptest::collection::vec(any::<bool>(), n),
    )
        .prop_map(|(clients, breaks)| {
            let mut routes: Vec<Vec<usize>> = vec![Vec::new()];
            for (client, new_route) in clients.into_iter().zip(breaks) {
                if new_route {
                    routes.push(Vec::new());
                }
                routes.last_mut().expect("at least one route").push(client);
            }
            encode(&routes)
        })
}
