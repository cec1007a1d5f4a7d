use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;

use super::columns;

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring what a spreadsheet can hold.
/// Used as a `BTreeMap` key when grouping, so it must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

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
                Date(_) => 5,
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
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
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
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Date(d) => d.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.0}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%d/%m/%Y")),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Interpret the cell as a whole number.
    ///
    /// Accepts integers, integral floats and numeric text (`"2024"`, `"3.0"`).
    pub fn as_whole_number(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            CellValue::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite() && v.fract() == 0.0)
                        .map(|v| v as i64)
                })
            }
            _ => None,
        }
    }

    /// Text used for marker matching; null reads as empty.
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

// ---------------------------------------------------------------------------
// RawTable – a sheet as read from disk
// ---------------------------------------------------------------------------

/// Header row plus data rows, before any normalization.
///
/// Every row has exactly `headers.len()` cells; loaders pad short rows
/// with [`CellValue::Null`].
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Build a table, padding or truncating rows to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        RawTable { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }
}

// ---------------------------------------------------------------------------
// HiringType – derived category
// ---------------------------------------------------------------------------

/// Why a position was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HiringType {
    NewPosition,
    Promotion,
    Replacement,
}

impl HiringType {
    pub const ALL: [HiringType; 3] = [
        HiringType::NewPosition,
        HiringType::Promotion,
        HiringType::Replacement,
    ];

    /// Label as it appears in the data and on screen.
    pub fn label(self) -> &'static str {
        match self {
            HiringType::NewPosition => "Vaga Nova",
            HiringType::Promotion => "Promoção",
            HiringType::Replacement => "Substituição",
        }
    }

    pub fn from_label(label: &str) -> Option<HiringType> {
        HiringType::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for HiringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// HiringRecord – one row of the prepared dataset
// ---------------------------------------------------------------------------

static NULL: CellValue = CellValue::Null;

/// A single hiring record after preparation.
#[derive(Debug, Clone)]
pub struct HiringRecord {
    /// Value of `ANO`, always inside the year allow-set.
    pub year: i32,
    /// Value of `MES` when it reads as a month number.
    pub month: Option<u32>,
    pub hiring_type: HiringType,
    /// Every column of the row (normalized name → value), including the
    /// derived `TIPO DE CONTRATACAO`.
    pub fields: BTreeMap<String, CellValue>,
}

impl HiringRecord {
    pub fn get(&self, column: &str) -> &CellValue {
        self.fields.get(column).unwrap_or(&NULL)
    }

    pub fn department(&self) -> &CellValue {
        self.get(columns::DEPARTMENT)
    }

    pub fn function(&self) -> &CellValue {
        self.get(columns::FUNCTION)
    }

    pub fn employee(&self) -> &CellValue {
        self.get(columns::EMPLOYEE)
    }

    /// `YYYY-MM` bucket for the monthly timeline.
    pub fn period(&self) -> Option<String> {
        self.month.map(|m| format!("{}-{:02}", self.year, m))
    }
}

// ---------------------------------------------------------------------------
// HiringDataset – the complete prepared dataset
// ---------------------------------------------------------------------------

/// The prepared dataset with pre-computed filter domains.
#[derive(Debug, Clone, Default)]
pub struct HiringDataset {
    /// All records (rows).
    pub records: Vec<HiringRecord>,
    /// Normalized column names in sheet order.
    pub column_names: Vec<String>,
    /// Distinct years present.
    pub years: BTreeSet<i32>,
    /// Distinct hiring types present.
    pub hiring_types: BTreeSet<HiringType>,
}

impl HiringDataset {
    /// Build the filter domains from the records.
    pub fn from_records(column_names: Vec<String>, records: Vec<HiringRecord>) -> Self {
        let years = records.iter().map(|r| r.year).collect();
        let hiring_types = records.iter().map(|r| r.hiring_type).collect();
        HiringDataset {
            records,
            column_names,
            years,
            hiring_types,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
