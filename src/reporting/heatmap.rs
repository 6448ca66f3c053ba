use crate::feature_selection_strategies::{pearson_correlation, FeatureSelection};
use crate::processing::CleanedTable;
use ndarray::{Array2, ArrayView1};
use serde::Serialize;

/// Display threshold used by the dashboard heatmap.
pub const DEFAULT_HEATMAP_THRESHOLD: f64 = 0.1;

/// Square, symmetric correlation matrix. `names` labels both axes; the target is last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == row)?;
        let j = self.names.iter().position(|n| n == column)?;
        Some(self.values[i][j])
    }
}

/// Pairwise Pearson r over the selected features plus the target, rounded to two
/// decimals. Off-diagonal entries with |r| below `threshold` are shown as 0.
pub fn correlation_heatmap(table: &CleanedTable, selection: &FeatureSelection, threshold: f64) -> CorrelationMatrix {
    let mut names: Vec<String> = selection.selected.names().to_vec();
    let mut columns: Vec<ArrayView1<f64>> = selection
        .selected
        .indices()
        .iter()
        .map(|&j| table.features().column(j))
        .collect();
    names.push(table.target_name().to_string());
    columns.push(table.target().view());

    let n = columns.len();
    let mut values = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        values[[i, i]] = 1.0;
        for j in (i + 1)..n {
            let r = (pearson_correlation(columns[i], columns[j]) * 100.0).round() / 100.0;
            let shown = if r.abs() < threshold { 0.0 } else { r };
            values[[i, j]] = shown;
            values[[j, i]] = shown;
        }
    }

    CorrelationMatrix {
        names,
        values: values.outer_iter().map(|row| row.to_vec()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_loading::{RawRecord, RawTable, RawValue};
    use crate::feature_selection_strategies::{CorrelationSelector, FeatureSelector};
    use crate::processing::{Cleaner, Schema};

    #[test]
    fn masks_weak_pairs_and_keeps_diagonal() {
        let rows = [(1.0, 3.0, 4.0), (2.0, 1.0, 6.0), (3.0, 4.0, 9.0), (4.0, 1.0, 11.0), (5.0, 5.0, 14.0)];
        let headers = ["a", "b", "G3"].map(String::from).to_vec();
        let records = rows
            .iter()
            .map(|(a, b, g3)| {
                RawRecord::from([
                    ("a".to_string(), RawValue::Number(*a)),
                    ("b".to_string(), RawValue::Number(*b)),
                    ("G3".to_string(), RawValue::Number(*g3)),
                ])
            })
            .collect();
        let schema = Schema::new("G3", 20.0, 5.0).numeric("a").numeric("b");
        let table = Cleaner::new(schema).clean(&RawTable::new(headers, records)).unwrap();
        let selection = CorrelationSelector::with_threshold(0.0).select(&table);

        let heatmap = correlation_heatmap(&table, &selection, 0.5);
        assert_eq!(heatmap.names, vec!["a", "b", "G3"]);
        assert_eq!(heatmap.get("a", "a"), Some(1.0));
        assert_eq!(heatmap.get("a", "G3"), heatmap.get("G3", "a"));
        assert!(heatmap.get("a", "G3").unwrap() > 0.99);
        // a and b are only weakly related
        assert_eq!(heatmap.get("a", "b"), Some(0.0));
        for row in &heatmap.values {
            for v in row {
                assert_eq!(*v, (v * 100.0).round() / 100.0);
            }
        }
    }
}
