use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use super::biologic::BioLogicReader;
use super::delimited::DelimitedReader;
use super::gamry::GamryReader;
use super::model::ParsedData;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a file could not be ingested. No partial data is ever returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No reader claims the file.
    #[error("unsupported file format: {name}")]
    Format { name: String },

    /// The claimed file lacks a structure its reader requires.
    #[error("{reader} parse error: {message}")]
    Parse { reader: &'static str, message: String },

    #[error("file is not valid UTF-8 text")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LoadError {
    pub(crate) fn parse(reader: &'static str, message: impl Into<String>) -> Self {
        LoadError::Parse {
            reader,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Raw input + reader contract
// ---------------------------------------------------------------------------

/// An uploaded file: its name (used for dispatch) and raw bytes.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        RawFile {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Lower-cased extension without the dot, or `""`.
    pub fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
    }

    /// Decode the bytes as UTF-8, dropping a leading byte-order mark.
    pub fn text(&self) -> Result<&str, LoadError> {
        let text = std::str::from_utf8(&self.bytes)?;
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
    }
}

/// A file-format reader.
pub trait FormatReader {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Whether this reader handles the file (extension based).
    fn can_parse(&self, file: &RawFile) -> bool;

    fn parse(&self, file: &RawFile) -> Result<ParsedData, LoadError>;
}

/// Readers in dispatch priority: specific formats before the generic
/// delimited-text fallback.
pub fn readers() -> [&'static dyn FormatReader; 3] {
    [&GamryReader, &BioLogicReader, &DelimitedReader]
}

/// First reader whose `can_parse` accepts the file.
pub fn detect_reader(file: &RawFile) -> Option<&'static dyn FormatReader> {
    readers().into_iter().find(|r| r.can_parse(file))
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse an in-memory file, dispatching on its name.
pub fn parse_file(file: &RawFile) -> Result<ParsedData, LoadError> {
    let reader = detect_reader(file).ok_or_else(|| LoadError::Format {
        name: file.name.clone(),
    })?;
    log::debug!("{} claimed by {} reader", file.name, reader.name());

    let parsed = reader.parse(file)?;
    log::info!(
        "Parsed {}: {} rows x {} columns, technique {}",
        file.name,
        parsed.data.n_rows(),
        parsed.data.n_columns(),
        parsed.technique
    );
    Ok(parsed)
}

/// Load and parse a file from disk.
pub fn load_file(path: &Path) -> Result<ParsedData> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let file = RawFile::new(name, bytes);
    parse_file(&file).with_context(|| format!("parsing {}", path.display()))
}
