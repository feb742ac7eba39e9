//! Raw parameter shapes produced by the parser.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use super::ParseError;

/// Index → value map of a vector parameter.
pub type Vector = BTreeMap<usize, f64>;

/// The textual shape a parameter was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `param NAME := value ;`
    Scalar,
    /// `param NAME := i1 v1 i2 v2 ... ;`
    Vector,
    /// `param NAME : c1 ... cK := r1 v11 ... ;`
    Matrix,
    /// `param NAME [*,*,f]: ... := ... ;`
    Sliced,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Scalar => "scalar",
            Shape::Vector => "vector",
            Shape::Matrix => "matrix",
            Shape::Sliced => "sliced 3-D block",
        };
        f.write_str(name)
    }
}

/// A 2-D block keyed by `(row, column)` indices.
///
/// Row and column indices are kept in declaration order; values are looked up
/// by index, not by position.
///
/// # Examples
///
/// ```
/// use dock_vrp::parser::parse_str;
///
/// let params = parse_str("param Dist : 0 1 2 := 0 0 5 9 1 5 0 3 2 9 3 0 ;").unwrap();
/// let dist = params.get("Dist").and_then(|p| p.as_matrix()).unwrap();
/// assert_eq!(dist.get(1, 2), Some(3.0));
/// assert_eq!(dist.rows(), &[0, 1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<usize>,
    rows: Vec<usize>,
    values: BTreeMap<(usize, usize), f64>,
}

impl Table {
    pub(crate) fn new(columns: Vec<usize>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            values: BTreeMap::new(),
        }
    }

    pub(crate) fn push_row(&mut self, row: usize, values: impl IntoIterator<Item = f64>) {
        self.rows.push(row);
        for (&col, value) in self.columns.iter().zip(values) {
            self.values.insert((row, col), value);
        }
    }

    /// Value at `(row, col)`, if declared.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(&(row, col)).copied()
    }

    /// Column indices from the header.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Row indices in declaration order.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// All `((row, col), value)` entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.values.iter().map(|(&key, &value)| (key, value))
    }

    /// Number of declared cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A parsed parameter in one of the four accepted shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Scalar(f64),
    Vector(Vector),
    Matrix(Table),
    /// Slice key (third index) → 2-D block.
    Sliced(BTreeMap<usize, Table>),
}

impl ParamValue {
    /// The shape this parameter was declared with.
    pub fn shape(&self) -> Shape {
        match self {
            ParamValue::Scalar(_) => Shape::Scalar,
            ParamValue::Vector(_) => Shape::Vector,
            ParamValue::Matrix(_) => Shape::Matrix,
            ParamValue::Sliced(_) => Shape::Sliced,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            ParamValue::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            ParamValue::Vector(vector) => Some(vector),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Table> {
        match self {
            ParamValue::Matrix(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_sliced(&self) -> Option<&BTreeMap<usize, Table>> {
        match self {
            ParamValue::Sliced(slices) => Some(slices),
            _ => None,
        }
    }
}

/// Parameter name → parsed value, accumulated over one or more files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet {
    params: BTreeMap<String, ParamValue>,
}

impl ParamSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Returns `true` if `name` has been declared.
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Iterates parameters in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.params.iter()
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Records a declaration made on `line`.
    ///
    /// Sliced blocks of the same name accumulate as long as their slice keys
    /// differ; any other repeated name is a [`ParseError::Duplicate`].
    pub(crate) fn declare(
        &mut self,
        name: &str,
        value: ParamValue,
        line: usize,
    ) -> Result<(), ParseError> {
        let duplicate = |slice| ParseError::Duplicate {
            name: name.to_string(),
            slice,
            line,
        };

        if !self.params.contains_key(name) {
            self.params.insert(name.to_string(), value);
            return Ok(());
        }

        match (self.params.get_mut(name), value) {
            (Some(ParamValue::Sliced(existing)), ParamValue::Sliced(slices)) => {
                if let Some(&key) = slices.keys().find(|key| existing.contains_key(key)) {
                    return Err(duplicate(Some(key)));
                }
                existing.extend(slices);
                Ok(())
            }
            _ => Err(duplicate(None)),
        }
    }
}

impl<'a> IntoIterator for &'a ParamSet {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(key: usize) -> ParamValue {
        let mut table = Table::new(vec![0, 1]);
        table.push_row(0, [0.0, 1.0]);
        ParamValue::Sliced(BTreeMap::from([(key, table)]))
    }

    #[test]
    fn test_table_lookup() {
        let mut table = Table::new(vec![3, 7]);
        table.push_row(1, [10.0, 20.0]);
        assert_eq!(table.get(1, 7), Some(20.0));
        assert_eq!(table.get(7, 1), None);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows(), &[1]);
    }

    #[test]
    fn test_declare_rejects_repeated_name() {
        let mut set = ParamSet::new();
        set.declare("Lc", ParamValue::Scalar(3.0), 1).expect("first");
        let err = set.declare("Lc", ParamValue::Scalar(4.0), 9).unwrap_err();
        assert_eq!(
            err,
            ParseError::Duplicate {
                name: "Lc".into(),
                slice: None,
                line: 9
            }
        );
        assert_eq!(set.get("Lc"), Some(&ParamValue::Scalar(3.0)));
    }

    #[test]
    fn test_declare_accumulates_slices() {
        let mut set = ParamSet::new();
        set.declare("tvia", slice(1), 1).expect("slice 1");
        set.declare("tvia", slice(2), 5).expect("slice 2");
        let slices = set.get("tvia").and_then(ParamValue::as_sliced).expect("sliced");
        assert_eq!(slices.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_declare_rejects_repeated_slice_key() {
        let mut set = ParamSet::new();
        set.declare("tvia", slice(1), 1).expect("slice 1");
        let err = set.declare("tvia", slice(1), 8).unwrap_err();
        assert!(matches!(err, ParseError::Duplicate { slice: Some(1), line: 8, .. }));
    }

    #[test]
    fn test_declare_rejects_mixed_shapes() {
        let mut set = ParamSet::new();
        set.declare("tvia", slice(1), 1).expect("slice 1");
        assert!(set.declare("tvia", ParamValue::Scalar(1.0), 2).is_err());
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(ParamValue::Scalar(1.0).shape().to_string(), "scalar");
        assert_eq!(slice(0).shape(), Shape::Sliced);
    }
}
