//! Builds a typed [`Instance`] from parsed parameters.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

use crate::distance::{DistanceMatrix, PeriodMatrix};
use crate::models::{Client, DockSettings, Instance, Period, Tariff, TimeWindow, Truck};
use crate::parser::{ParamSet, ParamValue, Shape, Table, Vector};

use super::schema;
use super::violation::{
    IndexSpace, ParamIndex, Report, ValidationError, Violation, ViolationKind,
};

type Ids = BTreeSet<usize>;

/// Builds and validates an instance.
///
/// Every check runs on whatever parameters are available, so one call reports
/// every problem in the file:
///
/// - required parameters must be declared with the expected shape;
/// - vector indices, matrix rows/columns and slice keys must be declared
///   node, truck or period ids (keys of `escliente`, `Cap`, `tinic`);
/// - `DemE`, `DemR` and `Cap` must be non-negative;
/// - every client, and every non-depot node used by `Dist` or `tvia`, needs
///   a `DemE`, `MinDC` and `MaxDC` entry; every truck needs `CH`, `CF6`,
///   `CF12`; every period needs `v` and `tfin`;
/// - the depot (`0`) must not carry demand;
/// - `MinDC <= MaxDC`; `nmuelles` and `Lc` are non-negative integers.
///
/// Parsed vectors keep the depot entry; the depot is filtered out here, so
/// [`Instance::clients`] holds only ids `>= 1` whose `escliente` is `1`.
///
/// # Examples
///
/// ```
/// use dock_vrp::parser::parse_str;
/// use dock_vrp::instance::build_instance;
///
/// let params = parse_str("param Cap := 1 -5 ;").unwrap();
/// let err = build_instance(&params).unwrap_err();
/// assert!(err.violations().iter().any(|v| v.param == "tvia"));
/// assert!(err.violations().iter().any(|v| v.param == "Cap"));
/// ```
pub fn build_instance(params: &ParamSet) -> Result<Instance, ValidationError> {
    let mut report = Report::default();
    let p = Lookups::read(params, &mut report);
    let r = &mut report;

    // Declared id ranges; checks against a missing range are skipped.
    let nodes: Option<Ids> = p.is_client.map(|v| v.keys().copied().collect());
    let trucks: Option<Ids> = p.capacity.map(|v| v.keys().copied().collect());
    let periods: Option<Ids> = p.period_start.map(|v| v.keys().copied().collect());

    for &id in nodes.iter().flat_map(|n| n.range(schema::MAX_NODE_ID + 1..)) {
        r.push(
            schema::IS_CLIENT,
            Some(ParamIndex::Entry(id)),
            ViolationKind::IdTooLarge {
                max: schema::MAX_NODE_ID,
            },
        );
    }

    for (name, v) in [
        (schema::IS_DEPOT, p.is_depot),
        (schema::IS_CRITICAL, p.critical),
        (schema::DELIVERY, p.delivery),
        (schema::PICKUP, p.pickup),
        (schema::SERVICE_TIME, p.service),
        (schema::EARLIEST, p.earliest),
        (schema::LATEST, p.latest),
    ] {
        check_entries(r, name, v, nodes.as_ref(), IndexSpace::Node);
    }
    for (name, v) in [
        (schema::HOURLY_COST, p.hourly_cost),
        (schema::FIXED_COST_6H, p.fixed_6h),
        (schema::FIXED_COST_12H, p.fixed_12h),
        (schema::IS_HOURLY, p.is_hourly),
        (schema::IS_FIXED_6H, p.is_fixed_6h),
        (schema::IS_FIXED_12H, p.is_fixed_12h),
    ] {
        check_entries(r, name, v, trucks.as_ref(), IndexSpace::Truck);
    }
    for (name, v) in [(schema::SPEED, p.speed), (schema::PERIOD_END, p.period_end)] {
        check_entries(r, name, v, periods.as_ref(), IndexSpace::Period);
    }

    if let Some(table) = p.dist {
        check_table(r, schema::DISTANCE, table, nodes.as_ref());
    }
    if let Some(slices) = p.tvia {
        for (&key, table) in slices {
            if periods.as_ref().is_some_and(|ids| !ids.contains(&key)) {
                r.push(
                    schema::TRAVEL_TIME,
                    Some(ParamIndex::Slice(key)),
                    ViolationKind::OutOfRange {
                        space: IndexSpace::Period,
                    },
                );
            }
            check_table(r, schema::TRAVEL_TIME, table, nodes.as_ref());
        }
    }

    for (name, v) in [
        (schema::DELIVERY, p.delivery),
        (schema::PICKUP, p.pickup),
        (schema::CAPACITY, p.capacity),
    ] {
        for (&i, &value) in v.into_iter().flatten() {
            if value < 0.0 {
                r.push(name, Some(ParamIndex::Entry(i)), ViolationKind::Negative { value });
            }
        }
    }

    for (name, v) in [(schema::DELIVERY, p.delivery), (schema::PICKUP, p.pickup)] {
        if let Some(&value) = v.and_then(|v| v.get(&0)).filter(|&&value| value != 0.0) {
            r.push(name, Some(ParamIndex::Entry(0)), ViolationKind::DepotDemand { value });
        }
    }

    let mut referenced: Ids = p.client_ids().into_iter().collect();
    referenced.extend(p.dist.into_iter().flat_map(table_ids));
    referenced.extend(p.tvia.into_iter().flat_map(|s| s.values()).flat_map(table_ids));
    referenced.remove(&0);
    let required_by_node = [
        (schema::DELIVERY, p.delivery),
        (schema::EARLIEST, p.earliest),
        (schema::LATEST, p.latest),
    ];
    check_references(r, &referenced, &required_by_node);

    let truck_ids = trucks.unwrap_or_default();
    let required_by_truck = [
        (schema::HOURLY_COST, p.hourly_cost),
        (schema::FIXED_COST_6H, p.fixed_6h),
        (schema::FIXED_COST_12H, p.fixed_12h),
    ];
    check_references(r, &truck_ids, &required_by_truck);

    let period_ids = periods.unwrap_or_default();
    let required_by_period = [(schema::SPEED, p.speed), (schema::PERIOD_END, p.period_end)];
    check_references(r, &period_ids, &required_by_period);

    if let (Some(earliest), Some(latest)) = (p.earliest, p.latest) {
        for (&id, &min) in earliest {
            if let Some(&max) = latest.get(&id) {
                if TimeWindow::new(min, max).is_none() {
                    r.push(
                        schema::EARLIEST,
                        Some(ParamIndex::Entry(id)),
                        ViolationKind::InvalidTimeWindow {
                            earliest: min,
                            latest: max,
                        },
                    );
                }
            }
        }
    }

    for (name, value) in [(schema::DOCKS, p.docks), (schema::LOADING_SLOTS, p.loading_slots)] {
        if let Some(value) = value.filter(|v| *v < 0.0 || v.fract() != 0.0) {
            r.push(name, None, ViolationKind::NotAnInteger { value });
        }
    }

    if !report.is_empty() {
        return Err(report.into_error());
    }

    let instance = p.assemble(params)?;
    info!(
        clients = instance.num_clients(),
        trucks = instance.num_trucks(),
        periods = instance.periods().len(),
        "instance built"
    );
    Ok(instance)
}

/// The schema parameters of a [`ParamSet`], each `None` when missing or of
/// the wrong shape.
struct Lookups<'a> {
    is_client: Option<&'a Vector>,
    is_depot: Option<&'a Vector>,
    critical: Option<&'a Vector>,
    delivery: Option<&'a Vector>,
    pickup: Option<&'a Vector>,
    service: Option<&'a Vector>,
    earliest: Option<&'a Vector>,
    latest: Option<&'a Vector>,

    capacity: Option<&'a Vector>,
    hourly_cost: Option<&'a Vector>,
    fixed_6h: Option<&'a Vector>,
    fixed_12h: Option<&'a Vector>,
    is_hourly: Option<&'a Vector>,
    is_fixed_6h: Option<&'a Vector>,
    is_fixed_12h: Option<&'a Vector>,

    speed: Option<&'a Vector>,
    period_start: Option<&'a Vector>,
    period_end: Option<&'a Vector>,

    dist: Option<&'a Table>,
    tvia: Option<&'a BTreeMap<usize, Table>>,

    docks: Option<f64>,
    slot_hours: Option<f64>,
    loading_slots: Option<f64>,
    loading_time: Option<f64>,
}

impl<'a> Lookups<'a> {
    /// Looks up every schema parameter, reporting missing or misshapen ones.
    fn read(params: &'a ParamSet, r: &mut Report) -> Self {
        Self {
            is_client: vector(params, schema::IS_CLIENT, r),
            is_depot: vector(params, schema::IS_DEPOT, r),
            critical: vector(params, schema::IS_CRITICAL, r),
            delivery: vector(params, schema::DELIVERY, r),
            pickup: vector(params, schema::PICKUP, r),
            service: vector(params, schema::SERVICE_TIME, r),
            earliest: vector(params, schema::EARLIEST, r),
            latest: vector(params, schema::LATEST, r),

            capacity: vector(params, schema::CAPACITY, r),
            hourly_cost: vector(params, schema::HOURLY_COST, r),
            fixed_6h: vector(params, schema::FIXED_COST_6H, r),
            fixed_12h: vector(params, schema::FIXED_COST_12H, r),
            is_hourly: vector(params, schema::IS_HOURLY, r),
            is_fixed_6h: vector(params, schema::IS_FIXED_6H, r),
            is_fixed_12h: vector(params, schema::IS_FIXED_12H, r),

            speed: vector(params, schema::SPEED, r),
            period_start: vector(params, schema::PERIOD_START, r),
            period_end: vector(params, schema::PERIOD_END, r),

            dist: matrix(params, schema::DISTANCE, r),
            tvia: sliced(params, schema::TRAVEL_TIME, r),

            docks: scalar(params, schema::DOCKS, r),
            slot_hours: scalar(params, schema::SLOT_HOURS, r),
            loading_slots: scalar(params, schema::LOADING_SLOTS, r),
            loading_time: scalar(params, schema::LOADING_TIME, r),
        }
    }

    /// Node ids other than the depot flagged `escliente = 1`.
    fn client_ids(&self) -> Vec<usize> {
        self.is_client
            .into_iter()
            .flatten()
            .filter(|&(&id, &flag)| id != 0 && flag == 1.0)
            .map(|(&id, _)| id)
            .collect()
    }

    /// Builds the instance; the first lookup that fails is returned as a
    /// violation.
    fn assemble(&self, params: &ParamSet) -> Result<Instance, Violation> {
        let is_client = present(schema::IS_CLIENT, self.is_client)?;
        let delivery = present(schema::DELIVERY, self.delivery)?;
        let pickup = present(schema::PICKUP, self.pickup)?;
        let service = present(schema::SERVICE_TIME, self.service)?;
        let critical = present(schema::IS_CRITICAL, self.critical)?;
        let earliest = present(schema::EARLIEST, self.earliest)?;
        let latest = present(schema::LATEST, self.latest)?;

        let clients = self
            .client_ids()
            .into_iter()
            .map(|id| {
                let (min, max) = (
                    entry(schema::EARLIEST, earliest, id)?,
                    entry(schema::LATEST, latest, id)?,
                );
                let window = TimeWindow::new(min, max).ok_or_else(|| {
                    Violation::new(
                        schema::EARLIEST,
                        Some(ParamIndex::Entry(id)),
                        ViolationKind::InvalidTimeWindow {
                            earliest: min,
                            latest: max,
                        },
                    )
                })?;
                let client = Client::new(
                    id,
                    entry(schema::DELIVERY, delivery, id)?,
                    pickup.get(&id).copied().unwrap_or(0.0),
                    service.get(&id).copied().unwrap_or(0.0),
                    window,
                )
                .with_critical(critical.get(&id) == Some(&1.0));
                Ok(client)
            })
            .collect::<Result<Vec<_>, Violation>>()?;

        let hourly_cost = present(schema::HOURLY_COST, self.hourly_cost)?;
        let fixed_6h = present(schema::FIXED_COST_6H, self.fixed_6h)?;
        let fixed_12h = present(schema::FIXED_COST_12H, self.fixed_12h)?;
        let is_hourly = present(schema::IS_HOURLY, self.is_hourly)?;
        let is_fixed_6h = present(schema::IS_FIXED_6H, self.is_fixed_6h)?;
        let is_fixed_12h = present(schema::IS_FIXED_12H, self.is_fixed_12h)?;
        let flag = |v: &Vector, id: usize, default: bool| v.get(&id).map_or(default, |&f| f == 1.0);
        let trucks = present(schema::CAPACITY, self.capacity)?
            .iter()
            .map(|(&id, &cap)| {
                let truck = Truck::new(id, cap)
                    .with_hourly_cost(entry(schema::HOURLY_COST, hourly_cost, id)?)
                    .with_fixed_costs(
                        entry(schema::FIXED_COST_6H, fixed_6h, id)?,
                        entry(schema::FIXED_COST_12H, fixed_12h, id)?,
                    )
                    .with_tariff(Tariff {
                        hourly: flag(is_hourly, id, true),
                        fixed_6h: flag(is_fixed_6h, id, false),
                        fixed_12h: flag(is_fixed_12h, id, false),
                    });
                Ok(truck)
            })
            .collect::<Result<Vec<_>, Violation>>()?;

        let speed = present(schema::SPEED, self.speed)?;
        let period_end = present(schema::PERIOD_END, self.period_end)?;
        let periods = present(schema::PERIOD_START, self.period_start)?
            .iter()
            .map(|(&id, &start)| {
                Ok(Period::new(
                    id,
                    start,
                    entry(schema::PERIOD_END, period_end, id)?,
                    entry(schema::SPEED, speed, id)?,
                ))
            })
            .collect::<Result<Vec<_>, Violation>>()?;

        let docks = DockSettings {
            docks: present(schema::DOCKS, self.docks)? as usize,
            slot_hours: present(schema::SLOT_HOURS, self.slot_hours)?,
            loading_slots: present(schema::LOADING_SLOTS, self.loading_slots)? as usize,
            loading_time: present(schema::LOADING_TIME, self.loading_time)?,
        };

        let dist = present(schema::DISTANCE, self.dist)?;
        let size = is_client.keys().next_back().map_or(1, |&max| max + 1);
        let distances = dense(dist, size);
        let expected = is_client.len() * is_client.len();
        if dist.len() < expected {
            warn!(
                declared = dist.len(),
                expected, "Dist does not cover every node pair; missing entries are 0"
            );
        }

        let mut travel_times = PeriodMatrix::new();
        for (&period, table) in present(schema::TRAVEL_TIME, self.tvia)? {
            travel_times.insert(period, dense(table, size));
        }
        if travel_times.is_empty() {
            warn!("tvia declares no period slices");
        }

        let extra: BTreeMap<String, ParamValue> = params
            .iter()
            .filter(|(name, _)| !schema::is_required(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Ok(Instance {
            clients,
            trucks,
            periods,
            docks,
            distances,
            travel_times,
            extra,
        })
    }
}

fn present<T>(name: &'static str, value: Option<T>) -> Result<T, Violation> {
    value.ok_or_else(|| Violation::new(name, None, ViolationKind::Missing))
}

fn entry(name: &'static str, vector: &Vector, id: usize) -> Result<f64, Violation> {
    vector.get(&id).copied().ok_or_else(|| {
        Violation::new(name, Some(ParamIndex::Entry(id)), ViolationKind::MissingReference)
    })
}

fn lookup<'a, T>(
    params: &'a ParamSet,
    name: &'static str,
    expected: Shape,
    extract: impl FnOnce(&'a ParamValue) -> Option<T>,
    report: &mut Report,
) -> Option<T> {
    let Some(value) = params.get(name) else {
        report.push(name, None, ViolationKind::Missing);
        return None;
    };
    let extracted = extract(value);
    if extracted.is_none() {
        report.push(
            name,
            None,
            ViolationKind::WrongShape {
                expected,
                found: value.shape(),
            },
        );
    }
    extracted
}

fn vector<'a>(params: &'a ParamSet, name: &'static str, report: &mut Report) -> Option<&'a Vector> {
    lookup(params, name, Shape::Vector, ParamValue::as_vector, report)
}

fn matrix<'a>(params: &'a ParamSet, name: &'static str, report: &mut Report) -> Option<&'a Table> {
    lookup(params, name, Shape::Matrix, ParamValue::as_matrix, report)
}

fn sliced<'a>(
    params: &'a ParamSet,
    name: &'static str,
    report: &mut Report,
) -> Option<&'a BTreeMap<usize, Table>> {
    lookup(params, name, Shape::Sliced, ParamValue::as_sliced, report)
}

fn scalar(params: &ParamSet, name: &'static str, report: &mut Report) -> Option<f64> {
    lookup(params, name, Shape::Scalar, ParamValue::as_scalar, report)
}

fn check_entries(
    report: &mut Report,
    name: &'static str,
    vector: Option<&Vector>,
    range: Option<&Ids>,
    space: IndexSpace,
) {
    let (Some(vector), Some(range)) = (vector, range) else {
        return;
    };
    for &i in vector.keys().filter(|i| !range.contains(i)) {
        report.push(name, Some(ParamIndex::Entry(i)), ViolationKind::OutOfRange { space });
    }
}

fn check_table(report: &mut Report, name: &'static str, table: &Table, nodes: Option<&Ids>) {
    let Some(nodes) = nodes else {
        return;
    };
    let space = IndexSpace::Node;
    for &row in table.rows().iter().filter(|i| !nodes.contains(i)) {
        report.push(name, Some(ParamIndex::Row(row)), ViolationKind::OutOfRange { space });
    }
    for &col in table.columns().iter().filter(|i| !nodes.contains(i)) {
        report.push(name, Some(ParamIndex::Column(col)), ViolationKind::OutOfRange { space });
    }
}

/// Flags ids in `ids` that have no entry in one of the `required` vectors.
fn check_references(report: &mut Report, ids: &Ids, required: &[(&'static str, Option<&Vector>)]) {
    for &id in ids {
        for &(name, vector) in required {
            if vector.is_some_and(|v| !v.contains_key(&id)) {
                report.push(name, Some(ParamIndex::Entry(id)), ViolationKind::MissingReference);
            }
        }
    }
}

fn table_ids(table: &Table) -> impl Iterator<Item = usize> + '_ {
    table.rows().iter().chain(table.columns()).copied()
}

fn dense(table: &Table, size: usize) -> DistanceMatrix {
    let mut matrix = DistanceMatrix::new(size);
    for ((row, col), value) in table.iter() {
        matrix.set(row, col, value);
    }
    matrix
}
