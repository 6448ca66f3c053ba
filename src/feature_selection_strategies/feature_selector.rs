use crate::error::ConfigError;
use crate::processing::CleanedTable;
use serde::Serialize;

/// Score of every candidate feature against the target, in table column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCorrelationTable {
    entries: Vec<(String, f64)>,
}

impl FeatureCorrelationTable {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == feature)
            .map(|(_, r)| *r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, r)| (name.as_str(), *r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Strongest association first, by absolute value. Ties keep column order.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        ranked
    }
}

/// Retained features, in table column order, with their column indices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedFeatureSet {
    names: Vec<String>,
    indices: Vec<usize>,
}

impl SelectedFeatureSet {
    pub fn new(names: Vec<String>, indices: Vec<usize>) -> Self {
        debug_assert_eq!(names.len(), indices.len());
        Self { names, indices }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.names.iter().any(|n| n == feature)
    }
}

/// Outcome of a selection run: the full score table plus what was kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSelection {
    pub correlations: FeatureCorrelationTable,
    pub selected: SelectedFeatureSet,
    pub threshold: f64,
}

impl FeatureSelection {
    /// Features that did not pass the threshold, with their scores.
    pub fn excluded(&self) -> Vec<(&str, f64)> {
        self.correlations
            .iter()
            .filter(|(name, _)| !self.selected.contains(name))
            .collect()
    }
}

pub trait FeatureSelector {
    fn get_name(&self) -> &str;

    /// Name of the score reported per feature (e.g. "Pearson r")
    fn get_metric_name(&self) -> &str {
        "Score"
    }

    fn get_supported_params(&self) -> Vec<&str>;

    fn set_param(&mut self, key: &str, value: &str) -> Result<(), ConfigError>;

    fn select(&self, table: &CleanedTable) -> FeatureSelection;
}
