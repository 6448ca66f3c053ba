use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// A single cell of the raw table: either a number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Interprets a loaded cell: numeric if it parses as a finite `f64` (comma decimals
    /// accepted), text otherwise. `NaN` and `inf` stay text.
    pub fn parse(cell: &str) -> Self {
        let trimmed = cell.trim();
        trimmed
            .parse::<f64>()
            .or_else(|_| trimmed.replace(',', ".").parse::<f64>())
            .ok()
            .filter(|n| n.is_finite())
            .map(RawValue::Number)
            .unwrap_or_else(|| RawValue::Text(trimmed.to_string()))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(_) => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{n}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// One student's attributes, keyed by column name.
pub type RawRecord = HashMap<String, RawValue>;

/// Loaded table before any cleaning
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    headers: Vec<String>,
    records: Vec<RawRecord>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, records: Vec<RawRecord>) -> Self {
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn num_rows(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input has no data: {0}")]
    Empty(&'static str),

    #[error("Malformed input: {0}")]
    Format(String),
}

/// Strategy for reading a raw table from some textual source.
pub trait DataLoader {
    fn get_name(&self) -> &str;

    /// Cheap structural check before a full parse.
    fn validate_format(&self, data: &str) -> Result<(), LoadError>;

    fn load_from_string(&self, data: &str) -> Result<RawTable, LoadError>;

    fn load_from_path(&self, path: &Path) -> Result<RawTable, LoadError> {
        let text = fs::read_to_string(path)?;
        log::debug!("{}: read {} bytes from {}", self.get_name(), text.len(), path.display());
        self.load_from_string(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_distinguishes_numbers_from_text() {
        assert_eq!(RawValue::parse("18"), RawValue::Number(18.0));
        assert_eq!(RawValue::parse(" 2,5 "), RawValue::Number(2.5));
        assert_eq!(RawValue::parse("GP"), RawValue::Text("GP".into()));
        assert_eq!(RawValue::parse("at_home"), RawValue::Text("at_home".into()));
        assert_eq!(RawValue::parse("NaN"), RawValue::Text("NaN".into()));
        assert_eq!(RawValue::parse("-inf"), RawValue::Text("-inf".into()));
    }

    #[test]
    fn untagged_serde_round_trips_both_variants() {
        let v: Vec<RawValue> = serde_json::from_str(r#"[3, "yes"]"#).unwrap();
        assert_eq!(v, vec![RawValue::Number(3.0), RawValue::Text("yes".into())]);
    }
}
