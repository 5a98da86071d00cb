//! Export of a parsed dataset to CSV, Excel-friendly CSV, or JSON.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use thiserror::Error;

use super::model::ParsedData;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no data to export")]
    Empty,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    /// CSV prefixed with a UTF-8 byte-order mark so spreadsheet tools pick
    /// the right encoding.
    ExcelCsv,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::ExcelCsv, ExportFormat::Json];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv | ExportFormat::ExcelCsv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::ExcelCsv => "CSV (Excel)",
            ExportFormat::Json => "JSON",
        }
    }
}

/// Write the data table as CSV: header row, then one record per row.
pub fn write_csv<W: Write>(parsed: &ParsedData, mut out: W, excel_bom: bool) -> Result<(), ExportError> {
    if parsed.data.is_empty() {
        return Err(ExportError::Empty);
    }
    if excel_bom {
        out.write_all("\u{feff}".as_bytes())?;
    }
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&parsed.data.columns)?;
    for row in &parsed.data.rows {
        writer.write_record(row.iter().map(|c| c.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Pretty-printed JSON of the whole parsed dataset.
pub fn to_json(parsed: &ParsedData) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(parsed)?)
}

/// Export to a file on disk in the given format.
pub fn export_to_path(parsed: &ParsedData, path: &Path, format: ExportFormat) -> anyhow::Result<()> {
    // Checked before the file is created.
    if format != ExportFormat::Json && parsed.data.is_empty() {
        return Err(ExportError::Empty).with_context(|| format!("exporting {}", path.display()));
    }
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = std::io::BufWriter::new(file);
    match format {
        ExportFormat::Csv => write_csv(parsed, &mut out, false),
        ExportFormat::ExcelCsv => write_csv(parsed, &mut out, true),
        ExportFormat::Json => to_json(parsed).and_then(|json| Ok(out.write_all(json.as_bytes())?)),
    }
    .with_context(|| format!("exporting {}", path.display()))?;
    out.flush().with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported {} as {}", path.display(), format.label());
    Ok(())
}
