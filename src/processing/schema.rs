//! Explicit, versioned column schema of the student table.
//!
//! The [`Schema`] is the declared contract checked when cleaning starts: every column,
//! its role and the rule used to turn it into numbers. The [`ColumnLayout`] is what
//! cleaning actually produced from it (observed category levels, expanded column
//! names and order), and is what prediction replays for a single record.

use crate::data_loading::{RawRecord, RawTable, RawValue};
use crate::error::{EncodingError, PipelineError, SchemaError};
use serde::Serialize;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnRole {
    Feature,
    Target,
    /// Prior-period grades; dropped before anything else sees them.
    Leakage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Encoding {
    Numeric,
    /// Two-valued text column mapped through a fixed value→bit table.
    Binary { zero: String, one: String },
    /// Expanded into one indicator column per observed level, none dropped.
    Categorical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    pub role: ColumnRole,
    pub encoding: Encoding,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    version: u32,
    columns: Vec<ColumnSpec>,
    target: String,
    target_raw_max: f64,
    target_scale: f64,
}

impl Schema {
    /// Empty schema around a target whose raw values live in `0..=target_raw_max`
    /// and are multiplied by `target_scale` during cleaning.
    pub fn new(target: &str, target_raw_max: f64, target_scale: f64) -> Self {
        Self {
            version: SCHEMA_VERSION,
            columns: vec![ColumnSpec {
                name: target.to_string(),
                role: ColumnRole::Target,
                encoding: Encoding::Numeric,
            }],
            target: target.to_string(),
            target_raw_max,
            target_scale,
        }
    }

    pub fn numeric(self, name: &str) -> Self {
        self.push(name, ColumnRole::Feature, Encoding::Numeric)
    }

    pub fn binary(self, name: &str, zero: &str, one: &str) -> Self {
        self.push(
            name,
            ColumnRole::Feature,
            Encoding::Binary {
                zero: zero.to_string(),
                one: one.to_string(),
            },
        )
    }

    pub fn categorical(self, name: &str) -> Self {
        self.push(name, ColumnRole::Feature, Encoding::Categorical)
    }

    pub fn leakage(self, name: &str) -> Self {
        self.push(name, ColumnRole::Leakage, Encoding::Numeric)
    }

    fn push(mut self, name: &str, role: ColumnRole, encoding: Encoding) -> Self {
        self.columns.retain(|c| c.name != name || c.role == ColumnRole::Target);
        self.columns.push(ColumnSpec {
            name: name.to_string(),
            role,
            encoding,
        });
        self
    }

    /// Portuguese secondary-school mathematics/language dataset (UCI "student performance").
    /// `G3` is the final grade on a 0–20 scale and is rescaled to 0–100.
    pub fn student_performance() -> Self {
        let yes_no = [
            "schoolsup",
            "famsup",
            "paid",
            "activities",
            "nursery",
            "higher",
            "internet",
            "romantic",
        ];

        let mut schema = Schema::new("G3", 20.0, 5.0)
            .binary("school", "GP", "MS")
            .binary("sex", "F", "M")
            .numeric("age")
            .binary("address", "U", "R")
            .binary("famsize", "LE3", "GT3")
            .binary("Pstatus", "T", "A")
            .numeric("Medu")
            .numeric("Fedu")
            .categorical("Mjob")
            .categorical("Fjob")
            .categorical("reason")
            .categorical("guardian")
            .numeric("traveltime")
            .numeric("studytime")
            .numeric("failures");
        for name in yes_no {
            schema = schema.binary(name, "no", "yes");
        }
        schema
            .numeric("famrel")
            .numeric("freetime")
            .numeric("goout")
            .numeric("Dalc")
            .numeric("Walc")
            .numeric("health")
            .numeric("absences")
            .leakage("G1")
            .leakage("G2")
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn target_raw_max(&self) -> f64 {
        self.target_raw_max
    }

    pub fn target_scale(&self) -> f64 {
        self.target_scale
    }

    /// Upper bound of the rescaled target.
    pub fn target_max(&self) -> f64 {
        self.target_raw_max * self.target_scale
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn features(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.role == ColumnRole::Feature)
    }

    pub fn leakage_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.role == ColumnRole::Leakage)
    }

    /// Every declared column must be present and nothing undeclared may appear.
    pub fn validate(&self, table: &RawTable) -> Result<(), SchemaError> {
        if let Some(missing) = self.columns.iter().find(|c| !table.has_column(&c.name)) {
            return Err(SchemaError::MissingColumn(missing.name.clone()));
        }
        if let Some(extra) = table.headers().iter().find(|h| self.column(h).is_none()) {
            return Err(SchemaError::UnexpectedColumn(extra.clone(), self.version));
        }
        Ok(())
    }
}

/// How one source attribute becomes output columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AttributeRule {
    Numeric,
    Binary { zero: String, one: String },
    Categorical { levels: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeLayout {
    pub name: String,
    pub rule: AttributeRule,
    /// Index of this attribute's first output column.
    pub offset: usize,
}

impl AttributeLayout {
    pub fn width(&self) -> usize {
        match &self.rule {
            AttributeRule::Categorical { levels } => levels.len(),
            _ => 1,
        }
    }

    pub fn column_names(&self) -> Vec<String> {
        match &self.rule {
            AttributeRule::Categorical { levels } => levels
                .iter()
                .map(|level| format!("{}_{}", self.name, level))
                .collect(),
            _ => vec![self.name.clone()],
        }
    }

    /// Writes this attribute's encoded value(s) into its slot of `out`.
    pub fn encode_into(&self, value: &RawValue, row: usize, out: &mut [f64]) -> Result<(), PipelineError> {
        match &self.rule {
            AttributeRule::Numeric => {
                out[self.offset] = value
                    .as_number()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| SchemaError::NotNumeric {
                        column: self.name.clone(),
                        found: value.to_string(),
                        row,
                    })?;
            }
            AttributeRule::Binary { zero, one } => {
                out[self.offset] = encode_binary(&self.name, zero, one, value)?;
            }
            AttributeRule::Categorical { levels } => {
                let text = value.to_string();
                let position = levels.iter().position(|l| *l == text).ok_or_else(|| {
                    EncodingError::UnknownCategory {
                        column: self.name.clone(),
                        value: text.clone(),
                        known: levels.clone(),
                    }
                })?;
                let slot = &mut out[self.offset..self.offset + levels.len()];
                slot.fill(0.0);
                slot[position] = 1.0;
            }
        }
        Ok(())
    }
}

/// Maps a binary cell to its bit. Calculator input may already carry the bit as 0/1.
pub fn encode_binary(column: &str, zero: &str, one: &str, value: &RawValue) -> Result<f64, EncodingError> {
    let bit = match value {
        RawValue::Text(s) if s == zero => Some(0.0),
        RawValue::Text(s) if s == one => Some(1.0),
        RawValue::Number(n) if *n == 0.0 || *n == 1.0 => Some(*n),
        _ => None,
    };
    bit.ok_or_else(|| EncodingError::UnknownBinaryValue {
        column: column.to_string(),
        value: value.to_string(),
        expected: [zero.to_string(), one.to_string()],
    })
}

/// Expanded column schema recorded by the cleaner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnLayout {
    schema_version: u32,
    attributes: Vec<AttributeLayout>,
    column_names: Vec<String>,
}

impl ColumnLayout {
    pub fn new(schema_version: u32, rules: Vec<(String, AttributeRule)>) -> Self {
        let mut offset = 0;
        let mut attributes = Vec::with_capacity(rules.len());
        let mut column_names = Vec::new();
        for (name, rule) in rules {
            let attribute = AttributeLayout { name, rule, offset };
            offset += attribute.width();
            column_names.extend(attribute.column_names());
            attributes.push(attribute);
        }
        Self {
            schema_version,
            attributes,
            column_names,
        }
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn attributes(&self) -> &[AttributeLayout] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeLayout> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn width(&self) -> usize {
        self.column_names.len()
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == column)
    }

    /// Source attribute an output column was expanded from.
    pub fn source_of(&self, column_index: usize) -> Option<&AttributeLayout> {
        self.attributes
            .iter()
            .find(|a| column_index >= a.offset && column_index < a.offset + a.width())
    }

    /// Encodes a complete record; every attribute must be present.
    pub fn encode_record(&self, record: &RawRecord, row: usize) -> Result<Vec<f64>, PipelineError> {
        let mut out = vec![0.0; self.width()];
        for attribute in &self.attributes {
            let value = record.get(&attribute.name).ok_or_else(|| SchemaError::MissingValue {
                row,
                column: attribute.name.clone(),
            })?;
            attribute.encode_into(value, row, &mut out)?;
        }
        Ok(out)
    }

    /// Encodes whatever attributes a partial record carries. Returns the row together with
    /// the names of attributes that were absent (their columns are left at 0).
    pub fn encode_partial(&self, record: &RawRecord) -> Result<(Vec<f64>, Vec<String>), PipelineError> {
        let mut out = vec![0.0; self.width()];
        let mut absent = Vec::new();
        for attribute in &self.attributes {
            match record.get(&attribute.name) {
                Some(value) => attribute.encode_into(value, 0, &mut out)?,
                None => absent.push(attribute.name.clone()),
            }
        }
        Ok((out, absent))
    }
}
