use super::labels::feature_label;
use crate::error::SchemaError;
use crate::processing::{AttributeRule, CleanedTable};
use ndarray::ArrayView1;
use serde::Serialize;
use statrs::statistics::{Data, Max, Min, OrderStatistics};
use std::collections::BTreeMap;

pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Share of cleaned rows carrying the `1` value of a binary attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetShare {
    pub attribute: String,
    pub label: String,
    pub percent: f64,
}

/// Percentage of rows with value 1 for every binary attribute, in layout order.
pub fn dataset_shares(table: &CleanedTable) -> Vec<DatasetShare> {
    let rows = table.num_rows().max(1) as f64;
    table
        .layout()
        .attributes()
        .iter()
        .filter_map(|attribute| match &attribute.rule {
            AttributeRule::Binary { one, .. } => {
                let ones = table.features().column(attribute.offset).sum();
                Some(DatasetShare {
                    attribute: attribute.name.clone(),
                    label: format!("{} ({one})", feature_label(&attribute.name)),
                    percent: ones / rows * 100.0,
                })
            }
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Fixed-width histogram over `[0, maximum]`. The last bin is closed on the right;
/// values outside the range are not counted.
pub fn grade_histogram(grades: ArrayView1<f64>, bins: usize, maximum: f64) -> Vec<HistogramBin> {
    if bins == 0 || maximum <= 0.0 {
        return Vec::new();
    }
    let width = maximum / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: i as f64 * width,
            upper: (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &grade in grades.iter().filter(|g| (0.0..=maximum).contains(*g)) {
        let index = ((grade / width) as usize).min(bins - 1);
        histogram[index].count += 1;
    }
    histogram
}

/// Box-plot summary of the grade within one group of rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub label: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

impl GroupSummary {
    fn from_grades(label: String, grades: Vec<f64>) -> Self {
        let count = grades.len();
        let mean = grades.iter().sum::<f64>() / count as f64;
        let mut data = Data::new(grades);
        Self {
            label,
            count,
            min: data.min(),
            q1: data.lower_quartile(),
            median: data.median(),
            q3: data.upper_quartile(),
            max: data.max(),
            mean,
        }
    }
}

/// Grade distribution per value of `attribute`. Binary and categorical groups are
/// labelled by their raw level; numeric groups by the value, in ascending order.
pub fn grade_by_group(table: &CleanedTable, attribute: &str) -> Result<Vec<GroupSummary>, SchemaError> {
    let layout = table
        .layout()
        .attribute(attribute)
        .ok_or_else(|| SchemaError::UnknownAttribute(attribute.to_string()))?;
    let features = table.features();
    let target = table.target();

    let mut groups: Vec<(String, Vec<f64>)> = match &layout.rule {
        AttributeRule::Binary { zero, one } => {
            let mut low = Vec::new();
            let mut high = Vec::new();
            for (value, grade) in features.column(layout.offset).iter().zip(target) {
                (if *value == 0.0 { &mut low } else { &mut high }).push(*grade);
            }
            vec![(zero.clone(), low), (one.clone(), high)]
        }
        AttributeRule::Categorical { levels } => levels
            .iter()
            .enumerate()
            .map(|(k, level)| {
                let grades: Vec<f64> = features
                    .column(layout.offset + k)
                    .iter()
                    .zip(target)
                    .filter(|(indicator, _)| **indicator == 1.0)
                    .map(|(_, grade)| *grade)
                    .collect();
                (level.clone(), grades)
            })
            .collect(),
        AttributeRule::Numeric => {
            // f64 is not Ord; keyed by an order-preserving bit encoding instead.
            let mut by_value: BTreeMap<u64, (f64, Vec<f64>)> = BTreeMap::new();
            for (value, grade) in features.column(layout.offset).iter().zip(target) {
                by_value
                    .entry(ordered_key(*value))
                    .or_insert_with(|| (*value, Vec::new()))
                    .1
                    .push(*grade);
            }
            by_value
                .into_values()
                .map(|(value, grades)| (value.to_string(), grades))
                .collect()
        }
    };

    groups.retain(|(_, grades)| !grades.is_empty());
    Ok(groups
        .into_iter()
        .map(|(label, grades)| GroupSummary::from_grades(label, grades))
        .collect())
}

/// Total order on finite floats encoded as an unsigned key.
fn ordered_key(value: f64) -> u64 {
    let bits = value.to_bits();
    if value.is_sign_negative() {
        !bits
    } else {
        bits | (1 << 63)
    }
}
