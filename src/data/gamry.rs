//! Gamry `.dta` reader.
//!
//! A DTA file is a block of tab-delimited header tags followed by one or
//! more data sections introduced by a `CURVE`, `ZCURVE` or `OCVCURVE` tag:
//!
//! ```text
//! TAG     CV
//! TITLE   LABEL   Cyclic Voltammetry  Test &Identifier
//! VSTEP   QUANT   0.002   Step Size (V)
//! CURVE   TABLE   402
//!         Pt  T   Vf  Im
//!         #   s   V vs. Ref.  A
//!         0   0.02    -0.5    -1.2E-06
//! ```
//!
//! Data cells that do not parse as numbers are stored as `0`.

use std::collections::BTreeMap;

use super::delimited::dedupe_headers;
use super::loader::{FormatReader, LoadError, RawFile};
use super::model::{Cell, DataTable, Instrument, MetadataValue, ParsedData};
use super::technique::classify;
use super::units::extract_units;

/// Second-field type tokens of Gamry `KEY  TYPE  VALUE  DESCRIPTION` lines.
const VALUE_TYPES: &[&str] = &[
    "LABEL", "QUANT", "IQUANT", "POTEN", "SELECTOR", "TOGGLE", "PSTAT", "DATE", "TIME",
    "ONEPARAM", "TWOPARAM",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct GamryReader;

impl FormatReader for GamryReader {
    fn name(&self) -> &'static str {
        "Gamry DTA"
    }

    fn can_parse(&self, file: &RawFile) -> bool {
        file.extension() == "dta"
    }

    fn parse(&self, file: &RawFile) -> Result<ParsedData, LoadError> {
        let text = file.text()?;
        let lines: Vec<&str> = text.lines().collect();

        let data_start = lines
            .iter()
            .position(|l| is_curve_tag(l))
            .ok_or_else(|| LoadError::parse(self.name(), "no data section found"))?;

        let metadata = parse_metadata(&lines[..data_start]);
        let section = parse_data_section(&lines[data_start + 1..])
            .ok_or_else(|| LoadError::parse(self.name(), "data section has no column header"))?;

        let technique = classify(&section.columns, text);
        let mut units = extract_units(&section.columns);
        units.extend(section.units);

        Ok(ParsedData {
            technique,
            instrument: Instrument::Gamry,
            metadata,
            data: DataTable::new(section.columns, section.rows),
            units,
        })
    }
}

/// `CURVE`, `CURVE2`, `ZCURVE`, `OCVCURVE`, ... in the first field.
fn is_curve_tag(line: &str) -> bool {
    line.split('\t')
        .next()
        .is_some_and(|first| first.trim().contains("CURVE"))
}

fn parse_metadata(lines: &[&str]) -> BTreeMap<String, MetadataValue> {
    let mut metadata = BTreeMap::new();
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("TAG") || !trimmed.contains('\t') {
            continue;
        }
        let parts: Vec<&str> = trimmed.split('\t').map(str::trim).collect();
        let key = parts[0];
        if key.is_empty() || parts.len() < 2 {
            continue;
        }
        let value = if parts.len() >= 3 && VALUE_TYPES.contains(&parts[1]) {
            MetadataValue::guess(parts[2])
        } else {
            MetadataValue::String(parts[1..].join("\t"))
        };
        metadata.insert(key.to_string(), value);
    }
    metadata
}

struct DataSection {
    columns: Vec<String>,
    units: BTreeMap<String, String>,
    rows: Vec<Vec<Cell>>,
}

fn split_fields(line: &str) -> Vec<&str> {
    line.trim().split('\t').map(str::trim).collect()
}

/// First field parses as a number.
fn looks_numeric(line: &str) -> bool {
    split_fields(line)
        .first()
        .is_some_and(|f| f.parse::<f64>().is_ok())
}

/// Unparseable and non-finite values read as zero.
fn zero_default_cell(field: &str) -> Cell {
    let value = field.parse::<f64>().ok().filter(|v| v.is_finite());
    Cell::Number(value.unwrap_or(0.0))
}

fn parse_data_section(lines: &[&str]) -> Option<DataSection> {
    let mut body = lines
        .iter()
        .copied()
        .filter(|l| !l.trim().is_empty() && !l.starts_with("TAG"));

    let header_line = body.next()?;
    let columns: Vec<String> = split_fields(header_line)
        .into_iter()
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    if columns.is_empty() {
        return None;
    }
    let columns = dedupe_headers(columns);

    let header_fields = split_fields(header_line);
    let mut body = body.peekable();
    let mut units = BTreeMap::new();
    let mut unit_fields = Vec::new();
    if let Some(next) = body.peek() {
        if !looks_numeric(next) {
            unit_fields = split_fields(next);
            for (col, unit) in columns.iter().zip(&unit_fields) {
                if !unit.is_empty() && *unit != "#" {
                    units.insert(col.clone(), unit.to_string());
                }
            }
            body.next();
        }
    }

    // Later curve blocks repeat their tag, header and units rows.
    let rows = body
        .filter(|l| !is_curve_tag(l))
        .map(split_fields)
        .filter(|fields| *fields != header_fields && *fields != unit_fields)
        .map(|fields| {
            fields
                .into_iter()
                .map(zero_default_cell)
                .collect()
        })
        .collect();

    Some(DataSection {
        columns,
        units,
        rows,
    })
}
