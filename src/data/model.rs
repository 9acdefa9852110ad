use std::fmt;

// ---------------------------------------------------------------------------
// Value – a single cell of the input table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, guessed from text or taken from the column type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Empty cell or a missing-value marker such as `NA`.
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "NaN"),
        }
    }
}

/// Text cells read as a missing value, the usual table-reader defaults.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl Value {
    /// Guess the type of a text cell: missing, integer, float, bool, else
    /// string.
    pub fn guess(s: &str) -> Self {
        if MISSING_MARKERS.contains(&s) {
            return Value::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
        if s == "true" || s == "false" {
            return Value::Bool(s == "true");
        }
        Value::String(s.to_string())
    }

    /// Interpret the value as a score. `Null` is a missing score (`NaN`).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            Value::Null => Some(f64::NAN),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Frame – the parsed input table
// ---------------------------------------------------------------------------

/// Ordered columns and rows exactly as read from the source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Frame {
    /// Position of a column by exact (case-sensitive) name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Record / Pair – the domain view of one row
// ---------------------------------------------------------------------------

/// One scored pair of identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub n1: String,
    pub n2: String,
    pub jac: f64,
}

/// The ordered identifier tuple `(n1, n2)`, used only as a display key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pair(pub String, pub String);

/// Renders as `(n1, n2)`; this is the axis label and the table cell.
impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

// ---------------------------------------------------------------------------
// PairTable – the transformed two-column view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PairRow {
    pub pair: Pair,
    pub jac: f64,
}

/// `(pair, jac)` rows in input order. Duplicate pairs are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairTable {
    pub rows: Vec<PairRow>,
}

impl PairTable {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Axis labels in row order.
    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.pair.to_string()).collect()
    }
}
