//! Unit annotations embedded in column headers.
//!
//! Two header styles are recognised: BioLogic-like `Ewe/V` and the common
//! `Voltage (V)`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static PAREN_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)\(([^()]+)\)\s*$").expect("valid unit regex"));

static PAREN_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").expect("valid suffix regex"));

/// Split a header into `(base name, unit)` if it carries a unit annotation.
///
/// `Name/Unit` is tried first (split on the first `/`), then `Name (Unit)`.
pub fn split_unit(header: &str) -> Option<(String, String)> {
    if let Some((name, unit)) = header.split_once('/') {
        let (name, unit) = (name.trim(), unit.trim());
        if !name.is_empty() && !unit.is_empty() {
            return Some((name.to_string(), unit.to_string()));
        }
    }
    let caps = PAREN_UNIT.captures(header)?;
    let name = caps.get(1)?.as_str().trim();
    let unit = caps.get(2)?.as_str().trim();
    if name.is_empty() || unit.is_empty() {
        return None;
    }
    Some((name.to_string(), unit.to_string()))
}

/// Map of base column name → unit for every header that carries one.
pub fn extract_units<S: AsRef<str>>(columns: &[S]) -> BTreeMap<String, String> {
    columns
        .iter()
        .filter_map(|c| split_unit(c.as_ref()))
        .collect()
}

/// Unit-free display name: drops a parenthesised suffix, then anything after
/// a `/`, then trims.
pub fn clean_column_name(header: &str) -> String {
    let stripped = PAREN_SUFFIX.replace(header, "");
    stripped.split('/').next().unwrap_or("").trim().to_string()
}
