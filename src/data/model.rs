use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cell – a single value in the data table
// ---------------------------------------------------------------------------

/// One cell of a parsed data row.
///
/// Numeric coercion is best-effort per cell: a token that does not parse as a
/// float is kept as its original text. Serializes untagged so rows come out as
/// plain JSON arrays (`[0.1, "ox", null]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Null,
}

impl Cell {
    /// Numeric value of the cell, if it holds a finite number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Null => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// MetadataValue – a single header/metadata entry
// ---------------------------------------------------------------------------

/// A dynamically-typed metadata value pulled from an instrument file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Null,
}

impl MetadataValue {
    /// Guess the most specific type for a raw header value.
    pub fn guess(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return MetadataValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return MetadataValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return MetadataValue::Float(f);
        }
        match s {
            "true" | "TRUE" | "True" => MetadataValue::Bool(true),
            "false" | "FALSE" | "False" => MetadataValue::Bool(false),
            _ => MetadataValue::String(s.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{v}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::String(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Technique / Instrument tags
// ---------------------------------------------------------------------------

/// Electrochemical technique inferred from a file's headers and content.
///
/// Assigned once at parse time and only used to route a dataset to the
/// matching plot builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technique {
    CV,
    EIS,
    BatteryCycling,
    CA,
    CP,
    Unknown,
}

impl Technique {
    pub const ALL: [Technique; 6] = [
        Technique::CV,
        Technique::EIS,
        Technique::BatteryCycling,
        Technique::CA,
        Technique::CP,
        Technique::Unknown,
    ];

    /// Human-readable name.
    pub fn long_name(self) -> &'static str {
        match self {
            Technique::CV => "Cyclic Voltammetry",
            Technique::EIS => "Electrochemical Impedance Spectroscopy",
            Technique::BatteryCycling => "Battery Cycling",
            Technique::CA => "Chronoamperometry",
            Technique::CP => "Chronopotentiometry",
            Technique::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Technique::CV => "CV",
            Technique::EIS => "EIS",
            Technique::BatteryCycling => "BatteryCycling",
            Technique::CA => "CA",
            Technique::CP => "CP",
            Technique::Unknown => "Unknown",
        };
        f.write_str(tag)
    }
}

/// Instrument family the file was read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instrument {
    Generic,
    Gamry,
    BioLogic,
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Instrument::Generic => "Generic",
            Instrument::Gamry => "Gamry",
            Instrument::BioLogic => "BioLogic",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// DataTable / ParsedData
// ---------------------------------------------------------------------------

/// Normalized tabular section of a file.
///
/// Invariant: every row has exactly `columns.len()` cells and `columns` keeps
/// file order. Constructors in this crate enforce it via [`DataTable::new`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl DataTable {
    /// Build a table, padding short rows with [`Cell::Null`] and truncating
    /// long ones so that every row matches the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Null);
                row
            })
            .collect();
        DataTable { columns, rows }
    }

    /// Index of the column with exactly this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A fully ingested instrument file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedData {
    pub technique: Technique,
    pub instrument: Instrument,
    pub metadata: BTreeMap<String, MetadataValue>,
    pub data: DataTable,
    /// Column base name → unit, e.g. `Ewe → V`.
    pub units: BTreeMap<String, String>,
}

impl ParsedData {
    pub fn columns(&self) -> &[String] {
        &self.data.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.data.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_are_resized_to_column_count() {
        let table = DataTable::new(
            vec!["a".into(), "b".into()],
            vec![
                vec![Cell::Number(1.0)],
                vec![Cell::Number(1.0), Cell::Number(2.0), Cell::Number(3.0)],
            ],
        );
        assert!(table.rows.iter().all(|r| r.len() == 2));
        assert_eq!(table.rows[0][1], Cell::Null);
    }

    #[test]
    fn metadata_guess_types() {
        assert_eq!(MetadataValue::guess("42"), MetadataValue::Integer(42));
        assert_eq!(MetadataValue::guess("0.5"), MetadataValue::Float(0.5));
        assert_eq!(MetadataValue::guess("TRUE"), MetadataValue::Bool(true));
        assert_eq!(MetadataValue::guess("  "), MetadataValue::Null);
        assert_eq!(
            MetadataValue::guess("Pstat"),
            MetadataValue::String("Pstat".into())
        );
    }

    #[test]
    fn cells_serialize_untagged() {
        let row = vec![Cell::Number(0.5), Cell::Text("ox".into()), Cell::Null];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"[0.5,"ox",null]"#);
    }

    #[test]
    fn non_finite_cells_are_not_numeric() {
        assert_eq!(Cell::Number(f64::NAN).as_f64(), None);
        assert_eq!(Cell::Number(2.0).as_f64(), Some(2.0));
        assert_eq!(Cell::Text("2".into()).as_f64(), None);
    }
}
