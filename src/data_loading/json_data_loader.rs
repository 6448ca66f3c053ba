use super::data_loader::{DataLoader, LoadError, RawRecord, RawTable, RawValue};
use serde_json::Value;

/// JSON loader for an array of flat objects:
/// `[{"school": "GP", "age": 18, ...}, ...]`
pub struct JsonDataLoader;

impl JsonDataLoader {
    pub fn new() -> Self {
        Self
    }

    fn parse_json_array(&self, json_text: &str) -> Result<(Vec<String>, Vec<RawRecord>), LoadError> {
        let parsed: Value = serde_json::from_str(json_text)?;

        let array = parsed
            .as_array()
            .ok_or_else(|| LoadError::Format("JSON must be an array of objects".to_string()))?;

        let first_obj = array
            .first()
            .ok_or(LoadError::Empty("JSON array is empty"))?
            .as_object()
            .ok_or_else(|| LoadError::Format("first element is not an object".to_string()))?;

        // serde_json without `preserve_order` yields keys sorted
        let headers: Vec<String> = first_obj.keys().cloned().collect();

        let mut records = Vec::with_capacity(array.len());
        for (idx, item) in array.iter().enumerate() {
            let obj = item
                .as_object()
                .ok_or_else(|| LoadError::Format(format!("element {idx} is not an object")))?;

            let mut record = RawRecord::new();
            for header in &headers {
                let value = obj.get(header).ok_or_else(|| {
                    LoadError::Format(format!("key '{header}' is missing in element {idx}"))
                })?;

                let raw = match value {
                    Value::Number(n) => n.as_f64().map(RawValue::Number).ok_or_else(|| {
                        LoadError::Format(format!("number for '{header}' does not fit f64"))
                    })?,
                    Value::String(s) => RawValue::Text(s.clone()),
                    Value::Bool(b) => RawValue::Text(if *b { "yes" } else { "no" }.to_string()),
                    _ => {
                        return Err(LoadError::Format(format!(
                            "unsupported value type for key '{header}' in element {idx}"
                        )))
                    }
                };
                record.insert(header.clone(), raw);
            }
            records.push(record);
        }

        Ok((headers, records))
    }
}

impl DataLoader for JsonDataLoader {
    fn get_name(&self) -> &str {
        "JSON Data Loader"
    }

    fn validate_format(&self, data: &str) -> Result<(), LoadError> {
        let trimmed = data.trim();
        if trimmed.is_empty() {
            return Err(LoadError::Empty("JSON input is blank"));
        }
        if !trimmed.starts_with('[') || !trimmed.ends_with(']') {
            return Err(LoadError::Format(
                "JSON must be an array (start with '[' and end with ']')".to_string(),
            ));
        }
        Ok(())
    }

    fn load_from_string(&self, data: &str) -> Result<RawTable, LoadError> {
        self.validate_format(data)?;
        let (headers, records) = self.parse_json_array(data)?;
        Ok(RawTable::new(headers, records))
    }
}

impl Default for JsonDataLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_become_yes_no_text() {
        let table = JsonDataLoader::new()
            .load_from_string(r#"[{"higher": true, "age": 17}, {"higher": false, "age": 16}]"#)
            .unwrap();
        assert_eq!(table.records()[0]["higher"], RawValue::Text("yes".into()));
        assert_eq!(table.records()[1]["higher"], RawValue::Text("no".into()));
        assert_eq!(table.records()[1]["age"], RawValue::Number(16.0));
    }

    #[test]
    fn objects_missing_a_key_are_rejected() {
        let err = JsonDataLoader::new()
            .load_from_string(r#"[{"a": 1, "b": 2}, {"a": 3}]"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::Format(_)));
    }
}
