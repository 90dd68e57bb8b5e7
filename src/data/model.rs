use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{EdaError, Result};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
/// Category counting keys maps by value, so `CellValue` must be `Ord + Hash`.
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord/Hash so floats can take part in map keys --

/// All NaNs are one value and `-0.0` is `0.0`.
fn canonical(v: f64) -> f64 {
    if v.is_nan() {
        f64::NAN
    } else if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => canonical(*a).total_cmp(&canonical(*b)),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => canonical(*f).to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Whole floats keep their decimal point, as Pandas prints them.
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CellValue::String(s) => serializer.serialize_str(s),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(v) => serializer.serialize_f64(*v),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Null => serializer.serialize_none(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl CellValue {
    /// Interpret the value as an `f64`; only integers and floats qualify.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Key under which values group into categories: a whole float shares
    /// its key with the equal integer.
    pub fn category_key(&self) -> CellValue {
        match self {
            CellValue::Float(v)
                if v.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(v) =>
            {
                CellValue::Integer(*v as i64)
            }
            other => other.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    /// At least one non-null value, and every non-null value is a number.
    Numeric,
    Categorical,
}

/// An immutable, header-ordered table of cells.
#[derive(Debug, Clone)]
pub struct Dataset {
    column_names: Vec<String>,
    column_kinds: Vec<ColumnKind>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Build a dataset from a header and its rows. Rows are padded with
    /// `Null` (or truncated) to the header width.
    pub fn new(column_names: Vec<String>, mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = column_names.len();
        for row in &mut rows {
            row.resize(width, CellValue::Null);
        }

        let column_kinds = (0..width)
            .map(|idx| {
                let mut saw_value = false;
                for row in &rows {
                    match &row[idx] {
                        CellValue::Null => {}
                        CellValue::Integer(_) | CellValue::Float(_) => saw_value = true,
                        _ => return ColumnKind::Categorical,
                    }
                }
                if saw_value {
                    ColumnKind::Numeric
                } else {
                    ColumnKind::Categorical
                }
            })
            .collect();

        Dataset {
            column_names,
            column_kinds,
            rows,
        }
    }

    /// Build a dataset column-wise; shorter columns are padded with `Null`.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<CellValue>)>) -> Self {
        let n_rows = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        let mut names = Vec::with_capacity(columns.len());
        let mut rows: Vec<Vec<CellValue>> = vec![Vec::with_capacity(columns.len()); n_rows];
        for (name, values) in columns {
            names.push(name.into());
            let mut values = values.into_iter();
            for row in &mut rows {
                row.push(values.next().unwrap_or(CellValue::Null));
            }
        }
        Dataset::new(names, rows)
    }

    /// Column names in header order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// All rows, each with one cell per column.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, or `MissingColumn` naming it.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.column_names
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| EdaError::MissingColumn(name.to_string()))
    }

    /// Iterate over one column's cells, top to bottom.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &CellValue> + '_> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    pub fn column_kind(&self, name: &str) -> Result<ColumnKind> {
        let idx = self.column_index(name)?;
        Ok(self.column_kinds[idx])
    }

    /// Names of numeric columns, in header order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.column_names
            .iter()
            .zip(&self.column_kinds)
            .filter(|(_, kind)| **kind == ColumnKind::Numeric)
            .map(|(name, _)| name.as_str())
    }
}
