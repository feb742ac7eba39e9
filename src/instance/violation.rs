//! Validation violations and the aggregated error.

use std::fmt;

use thiserror::Error;

use crate::parser::Shape;

/// The id range an index is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSpace {
    /// Keys of `escliente`.
    Node,
    /// Keys of `Cap`.
    Truck,
    /// Keys of `tinic`.
    Period,
}

impl fmt::Display for IndexSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexSpace::Node => "node",
            IndexSpace::Truck => "truck",
            IndexSpace::Period => "period",
        })
    }
}

/// Where in a parameter a violation was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamIndex {
    /// A vector entry.
    Entry(usize),
    /// A matrix row (every slice of a sliced block shares rows).
    Row(usize),
    /// A matrix column.
    Column(usize),
    /// A slice key of a sliced block.
    Slice(usize),
}

impl fmt::Display for ParamIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamIndex::Entry(i) => write!(f, "[{i}]"),
            ParamIndex::Row(i) => write!(f, " row {i}"),
            ParamIndex::Column(i) => write!(f, " column {i}"),
            ParamIndex::Slice(i) => write!(f, " [*,*,{i}]"),
        }
    }
}

/// A type of semantic violation in a parsed instance.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// Required parameter not declared.
    Missing,
    /// Declared with a different block shape than the schema expects.
    WrongShape { expected: Shape, found: Shape },
    /// Index outside the declared id range.
    OutOfRange { space: IndexSpace },
    /// Negative demand or capacity.
    Negative { value: f64 },
    /// A node, truck or period used elsewhere has no entry here.
    MissingReference,
    /// The depot carries a nonzero demand.
    DepotDemand { value: f64 },
    /// `MinDC` after `MaxDC`.
    InvalidTimeWindow { earliest: f64, latest: f64 },
    /// A count parameter that is not a non-negative integer.
    NotAnInteger { value: f64 },
    /// A node id above the largest id matrices are built for.
    IdTooLarge { max: usize },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Missing => f.write_str("required parameter is missing"),
            ViolationKind::WrongShape { expected, found } => {
                write!(f, "expected a {expected}, found a {found}")
            }
            ViolationKind::OutOfRange { space } => write!(f, "not a declared {space} id"),
            ViolationKind::Negative { value } => write!(f, "negative value {value}"),
            ViolationKind::MissingReference => f.write_str("referenced id has no entry"),
            ViolationKind::DepotDemand { value } => {
                write!(f, "depot must not carry demand, found {value}")
            }
            ViolationKind::InvalidTimeWindow { earliest, latest } => {
                write!(f, "time window [{earliest}, {latest}] is empty")
            }
            ViolationKind::NotAnInteger { value } => {
                write!(f, "{value} is not a non-negative integer")
            }
            ViolationKind::IdTooLarge { max } => write!(f, "node id exceeds {max}"),
        }
    }
}

/// A single invalid fact: parameter name, optional index, description.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub param: &'static str,
    pub index: Option<ParamIndex>,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(param: &'static str, index: Option<ParamIndex>, kind: ViolationKind) -> Self {
        Self { param, index, kind }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param)?;
        if let Some(index) = &self.index {
            write!(f, "{index}")?;
        }
        write!(f, ": {}", self.kind)
    }
}

/// Every violation found while building an instance.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("instance failed validation with {} violation(s){}", .violations.len(), listing(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

fn listing(violations: &[Violation]) -> String {
    violations
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{}{v}", if i == 0 { ": " } else { "; " }))
        .collect()
}

impl From<Violation> for ValidationError {
    fn from(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

impl ValidationError {
    /// The violations, in detection order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Number of distinct violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Collects violations, keeping one entry per distinct fact.
#[derive(Debug, Default)]
pub(crate) struct Report {
    violations: Vec<Violation>,
}

impl Report {
    pub fn push(&mut self, param: &'static str, index: Option<ParamIndex>, kind: ViolationKind) {
        let violation = Violation::new(param, index, kind);
        if !self.violations.contains(&violation) {
            self.violations.push(violation);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_error(self) -> ValidationError {
        ValidationError {
            violations: self.violations,
        }
    }
}
