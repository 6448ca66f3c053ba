use super::csv_data_loader::CsvDataLoader;
use super::data_loader::{DataLoader, LoadError};
use super::json_data_loader::JsonDataLoader;
use std::path::Path;

/// Picks a loader by format name or file extension.
pub struct DataLoaderFactory;

impl DataLoaderFactory {
    pub fn create(loader_type: &str) -> Result<Box<dyn DataLoader>, LoadError> {
        match loader_type.to_lowercase().as_str() {
            "csv" => Ok(Box::new(CsvDataLoader::new())),
            "json" => Ok(Box::new(JsonDataLoader::new())),
            other => Err(LoadError::Format(format!(
                "unknown loader type '{other}', expected one of: {}",
                Self::available_formats().join(", ")
            ))),
        }
    }

    /// `.json` files get the JSON loader, everything else is read as `;`-separated CSV.
    pub fn for_path(path: &Path) -> Box<dyn DataLoader> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Box::new(JsonDataLoader::new()),
            _ => Box::new(CsvDataLoader::new()),
        }
    }

    pub fn available_formats() -> Vec<&'static str> {
        vec!["csv", "json"]
    }
}
