use super::data_loader::{DataLoader, LoadError, RawRecord, RawTable, RawValue};
use csv::{ReaderBuilder, Trim};

/// CSV loader. The UCI student files are `;`-separated with quoted text cells.
pub struct CsvDataLoader {
    delimiter: u8,
}

impl CsvDataLoader {
    pub fn new() -> Self {
        Self { delimiter: b';' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    fn parse_csv(&self, csv_text: &str) -> Result<(Vec<String>, Vec<RawRecord>), LoadError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(csv_text.as_bytes());

        let headers: Vec<String> = rdr.headers()?.iter().map(|s| s.trim().to_string()).collect();

        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(LoadError::Empty("CSV has no columns"));
        }

        let mut records = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let row: RawRecord = headers
                .iter()
                .zip(record.iter())
                .map(|(header, cell)| (header.clone(), RawValue::parse(cell)))
                .collect();
            records.push(row);
        }

        if records.is_empty() {
            return Err(LoadError::Empty("CSV contains a header but no rows"));
        }

        Ok((headers, records))
    }
}

impl DataLoader for CsvDataLoader {
    fn get_name(&self) -> &str {
        "CSV Data Loader"
    }

    fn validate_format(&self, data: &str) -> Result<(), LoadError> {
        if data.trim().is_empty() {
            return Err(LoadError::Empty("CSV input is blank"));
        }

        if data.lines().filter(|l| !l.trim().is_empty()).count() < 2 {
            return Err(LoadError::Format(
                "CSV must contain a header line and at least one data line".to_string(),
            ));
        }

        Ok(())
    }

    fn load_from_string(&self, data: &str) -> Result<RawTable, LoadError> {
        self.validate_format(data)?;
        let (headers, records) = self.parse_csv(data)?;
        log::debug!(
            "{}: parsed {} rows x {} columns",
            self.get_name(),
            records.len(),
            headers.len()
        );
        Ok(RawTable::new(headers, records))
    }
}

impl Default for CsvDataLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_semicolon_separated_quoted_cells() {
        let text = "\"school\";\"age\";\"G3\"\n\"GP\";18;6\n\"MS\";17;0\n";
        let table = CsvDataLoader::new().load_from_string(text).unwrap();

        assert_eq!(table.headers(), &["school", "age", "G3"]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.records()[0]["school"], RawValue::Text("GP".into()));
        assert_eq!(table.records()[1]["age"], RawValue::Number(17.0));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let text = "a;b\n1;2\n3\n";
        let err = CsvDataLoader::new().load_from_string(text).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn header_only_input_is_rejected() {
        let err = CsvDataLoader::with_delimiter(b',').load_from_string("a,b\n").unwrap_err();
        assert!(matches!(err, LoadError::Format(_)));
    }
}
