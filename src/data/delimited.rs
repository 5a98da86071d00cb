//! Generic delimited text reader (`.csv`, `.txt`).
//!
//! Header row required, `#` comment lines skipped, blank lines skipped, cells
//! typed dynamically: numbers become [`Cell::Number`], anything else stays
//! as its original text.

use std::collections::{BTreeMap, BTreeSet};

use csv::{ReaderBuilder, Trim};

use super::loader::{FormatReader, LoadError, RawFile};
use super::model::{Cell, DataTable, Instrument, MetadataValue, ParsedData};
use super::technique::{classify, snippet};
use super::units::extract_units;

/// Characters of raw text fed to the technique classifier.
pub const CLASSIFY_SNIPPET_CHARS: usize = 1000;

const DELIMITER_CANDIDATES: [u8; 4] = [b',', b'\t', b';', b'|'];

#[derive(Debug, Clone, Copy, Default)]
pub struct DelimitedReader;

impl FormatReader for DelimitedReader {
    fn name(&self) -> &'static str {
        "CSV"
    }

    fn can_parse(&self, file: &RawFile) -> bool {
        matches!(file.extension().as_str(), "csv" | "txt")
    }

    fn parse(&self, file: &RawFile) -> Result<ParsedData, LoadError> {
        let text = file.text()?;
        let delimiter = sniff_delimiter(text);

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(LoadError::parse(self.name(), "no header row found"));
        }
        let columns = dedupe_headers(headers);

        let mut rows = Vec::new();
        for (row_no, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("{}: skipping malformed record {row_no}: {e}", file.name);
                    continue;
                }
            };
            // Whitespace-only lines; rows of empty fields stay as nulls.
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            rows.push(record.iter().map(coerce_cell).collect());
        }

        let mut metadata = comment_metadata(text);
        metadata.insert(
            "comments".to_string(),
            MetadataValue::from("Parsed from generic CSV file"),
        );
        metadata.insert(
            "delimiter".to_string(),
            MetadataValue::String(char::from(delimiter).to_string()),
        );

        let technique = classify(&columns, snippet(text, CLASSIFY_SNIPPET_CHARS));
        let units = extract_units(&columns);

        Ok(ParsedData {
            technique,
            instrument: Instrument::Generic,
            metadata,
            data: DataTable::new(columns, rows),
            units,
        })
    }
}

/// Dynamic typing for one field: empty → null, finite float → number,
/// otherwise the original text.
pub fn coerce_cell(field: &str) -> Cell {
    if field.is_empty() {
        return Cell::Null;
    }
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Number(v),
        _ => Cell::Text(field.to_string()),
    }
}

/// Pick the delimiter that occurs most often on the header line.
fn sniff_delimiter(text: &str) -> u8 {
    let Some(header) = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with('#'))
    else {
        return b',';
    };

    let mut best = (b',', 0usize);
    for &candidate in &DELIMITER_CANDIDATES {
        let count = header.bytes().filter(|&b| b == candidate).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }
    best.0
}

/// Make header names unique by suffixing repeats with `_1`, `_2`, ...
pub(crate) fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut out = Vec::with_capacity(headers.len());
    for header in headers {
        let mut name = header.clone();
        let mut n = 0;
        while seen.contains(&name) {
            n += 1;
            name = format!("{header}_{n}");
        }
        seen.insert(name.clone());
        out.push(name);
    }
    out
}

/// `# key: value` comment lines become metadata entries.
fn comment_metadata(text: &str) -> BTreeMap<String, MetadataValue> {
    text.lines()
        .filter_map(|l| l.trim_start().strip_prefix('#'))
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), MetadataValue::guess(v)))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}
