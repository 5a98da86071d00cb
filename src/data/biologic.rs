//! BioLogic EC-Lab ASCII (`.mpt`) reader.
//!
//! ```text
//! EC-Lab ASCII FILE
//! Nb header lines : 6
//!
//! Cyclic Voltammetry
//! Electrode material : Pt
//! mode    time/s  Ewe/V   <I>/mA  cycle number
//! 2       0,000   0,100   0,002   1
//! ```
//!
//! Line `N` of an `N`-line header holds the tab-delimited column names.
//! Exports without the header block start directly with the column names.
//! Numbers may use a decimal comma.

use std::collections::BTreeMap;

use super::delimited::{coerce_cell, dedupe_headers};
use super::loader::{FormatReader, LoadError, RawFile};
use super::model::{Cell, DataTable, Instrument, MetadataValue, ParsedData};
use super::technique::classify;
use super::units::extract_units;

const BANNER: &str = "EC-Lab ASCII FILE";
const HEADER_COUNT_KEY: &str = "Nb header lines";

#[derive(Debug, Clone, Copy, Default)]
pub struct BioLogicReader;

impl FormatReader for BioLogicReader {
    fn name(&self) -> &'static str {
        "BioLogic MPT"
    }

    fn can_parse(&self, file: &RawFile) -> bool {
        file.extension() == "mpt"
    }

    fn parse(&self, file: &RawFile) -> Result<ParsedData, LoadError> {
        let text = file.text()?;
        let lines: Vec<&str> = text.lines().collect();

        let header_idx = if lines.first().is_some_and(|l| l.trim() == BANNER) {
            let count = header_line_count(&lines)
                .ok_or_else(|| LoadError::parse(self.name(), "missing 'Nb header lines'"))?;
            if count == 0 || count > lines.len() {
                return Err(LoadError::parse(
                    self.name(),
                    format!("header claims {count} lines but file has {}", lines.len()),
                ));
            }
            count - 1
        } else {
            lines
                .iter()
                .position(|l| !l.trim().is_empty())
                .ok_or_else(|| LoadError::parse(self.name(), "no column header found"))?
        };

        let columns = dedupe_headers(
            lines[header_idx]
                .trim_end()
                .split('\t')
                .map(|c| c.trim().to_string())
                .collect(),
        );
        if columns.iter().all(String::is_empty) {
            return Err(LoadError::parse(self.name(), "empty column header line"));
        }

        let rows: Vec<Vec<Cell>> = lines[header_idx + 1..]
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.trim_end().split('\t').map(coerce_decimal).collect())
            .collect();

        let header_block = &lines[..header_idx];
        let metadata = parse_metadata(header_block);
        let technique = classify(&columns, &header_block.join("\n"));
        let units = extract_units(&columns);

        Ok(ParsedData {
            technique,
            instrument: Instrument::BioLogic,
            metadata,
            data: DataTable::new(columns, rows),
            units,
        })
    }
}

fn header_line_count(lines: &[&str]) -> Option<usize> {
    lines.iter().take(5).find_map(|l| {
        let (key, value) = l.split_once(':')?;
        if key.trim() == HEADER_COUNT_KEY {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

/// `key : value` lines, plus the free-standing technique title.
fn parse_metadata(header: &[&str]) -> BTreeMap<String, MetadataValue> {
    let mut metadata = BTreeMap::new();
    for line in header.iter().skip(1).map(|l| l.trim()) {
        if line.is_empty() {
            continue;
        }
        match line.split_once(" : ") {
            Some((key, value)) if key.trim() != HEADER_COUNT_KEY => {
                metadata.insert(key.trim().to_string(), MetadataValue::guess(value));
            }
            Some(_) => {}
            None => {
                metadata
                    .entry("technique_name".to_string())
                    .or_insert_with(|| MetadataValue::String(line.to_string()));
            }
        }
    }
    metadata
}

/// Like CSV coercion, but `0,125` is read as `0.125`.
fn coerce_decimal(field: &str) -> Cell {
    let field = field.trim();
    if field.contains(',') && !field.contains('.') {
        match coerce_cell(&field.replace(',', ".")) {
            Cell::Number(v) => Cell::Number(v),
            _ => coerce_cell(field),
        }
    } else {
        coerce_cell(field)
    }
}
