use crate::data_loading::{RawRecord, RawTable, RawValue};
use crate::error::{PipelineError, SchemaError};
use crate::processing::label_encoder::BinaryEncoder;
use crate::processing::ohencoder::OneHotEncoder;
use crate::processing::schema::{AttributeRule, ColumnLayout, Encoding, Schema};
use ndarray::{Array1, Array2, ArrayView1};
use serde::Serialize;

/// What cleaning removed, reported next to the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub kept_rows: usize,
    /// Rows whose final grade was 0 (did not sit the exam).
    pub filtered_rows: usize,
    pub dropped_columns: Vec<String>,
}

/// Analysis-ready table: every column numeric, target rescaled, zero grades removed.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    layout: ColumnLayout,
    features: Array2<f64>,
    target: Array1<f64>,
    target_name: String,
    report: CleaningReport,
}

impl CleanedTable {
    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn feature_names(&self) -> &[String] {
        self.layout.column_names()
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn target(&self) -> &Array1<f64> {
        &self.target
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn report(&self) -> &CleaningReport {
        &self.report
    }

    pub fn num_rows(&self) -> usize {
        self.features.nrows()
    }

    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.layout
            .index_of(name)
            .map(|j| self.features.column(j))
    }
}

/// Removes every row whose target is exactly 0. Returns the kept rows and how many were removed.
///
/// A fixed policy, not an outlier test: a zero final grade means the student did not
/// take the exam. Applying it twice removes nothing the second time.
pub fn drop_zero_targets<T>(rows: Vec<T>, target: impl Fn(&T) -> f64) -> (Vec<T>, usize) {
    let before = rows.len();
    let kept: Vec<T> = rows.into_iter().filter(|r| target(r) != 0.0).collect();
    let removed = before - kept.len();
    (kept, removed)
}

/// Turns a raw table into a [`CleanedTable`] according to a [`Schema`].
pub struct Cleaner {
    schema: Schema,
}

impl Cleaner {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn get_name(&self) -> &str {
        "Student Table Cleaner"
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn clean(&self, raw: &RawTable) -> Result<CleanedTable, PipelineError> {
        self.schema.validate(raw)?;

        let target = self.schema.target();
        let raw_max = self.schema.target_raw_max();
        let scale = self.schema.target_scale();

        // Rescale first so the zero filter sees the final scale.
        let mut scaled = Vec::with_capacity(raw.num_rows());
        for (row, record) in raw.records().iter().enumerate() {
            let value = cell(record, target, row)?;
            let grade = value.as_number().ok_or_else(|| SchemaError::NotNumeric {
                column: target.to_string(),
                found: value.to_string(),
                row,
            })?;
            if !(0.0..=raw_max).contains(&grade) {
                return Err(SchemaError::TargetOutOfRange {
                    column: target.to_string(),
                    value: grade,
                    max: raw_max,
                    row,
                }
                .into());
            }
            scaled.push((row, record, grade * scale));
        }

        let (kept, filtered_rows) = drop_zero_targets(scaled, |(_, _, grade)| *grade);
        if kept.is_empty() {
            return Err(SchemaError::EmptyTable {
                input: raw.num_rows(),
                filtered: filtered_rows,
            }
            .into());
        }

        let all: Vec<(usize, &RawRecord)> = raw.records().iter().enumerate().collect();
        let records: Vec<(usize, &RawRecord)> = kept.iter().map(|(row, record, _)| (*row, *record)).collect();
        let layout = self.fit_layout(&all, &records)?;

        let mut features = Array2::zeros((kept.len(), layout.width()));
        for (i, (row, record)) in records.iter().enumerate() {
            let encoded = layout.encode_record(record, *row)?;
            features.row_mut(i).assign(&ArrayView1::from(encoded.as_slice()));
        }
        let target_values: Array1<f64> = kept.iter().map(|(_, _, grade)| *grade).collect();

        let dropped_columns: Vec<String> = self.schema.leakage_columns().map(|c| c.name.clone()).collect();
        let report = CleaningReport {
            input_rows: raw.num_rows(),
            kept_rows: kept.len(),
            filtered_rows,
            dropped_columns,
        };
        log::info!(
            "Cleaned {} rows: kept {}, filtered {} zero-grade rows, dropped columns {:?}, {} encoded columns",
            report.input_rows,
            report.kept_rows,
            report.filtered_rows,
            report.dropped_columns,
            layout.width()
        );

        Ok(CleanedTable {
            layout,
            features,
            target: target_values,
            target_name: target.to_string(),
            report,
        })
    }

    /// Decides the output columns: fixed bit tables for binary attributes, checked
    /// against every raw row, and levels observed in the kept rows for categorical ones.
    fn fit_layout(
        &self,
        all: &[(usize, &RawRecord)],
        kept: &[(usize, &RawRecord)],
    ) -> Result<ColumnLayout, PipelineError> {
        let mut rules = Vec::new();
        for spec in self.schema.features() {
            let rule = match &spec.encoding {
                Encoding::Numeric => AttributeRule::Numeric,
                Encoding::Binary { zero, one } => {
                    BinaryEncoder::new(zero, one).fit(&spec.name, cells(all, &spec.name)?)?
                }
                Encoding::Categorical => OneHotEncoder.fit(cells(kept, &spec.name)?),
            };
            rules.push((spec.name.clone(), rule));
        }
        Ok(ColumnLayout::new(self.schema.version(), rules))
    }
}

fn cells<'a>(records: &[(usize, &'a RawRecord)], column: &str) -> Result<Vec<&'a RawValue>, SchemaError> {
    records
        .iter()
        .map(|&(row, record)| cell(record, column, row))
        .collect()
}

fn cell<'a>(record: &'a RawRecord, column: &str, row: usize) -> Result<&'a RawValue, SchemaError> {
    record.get(column).ok_or_else(|| SchemaError::MissingValue {
        row,
        column: column.to_string(),
    })
}
