use crate::data_loading::RawValue;
use crate::error::EncodingError;
use crate::processing::schema::{encode_binary, AttributeRule};
use std::collections::BTreeSet;

/// Binary label encoder with a fixed value→bit table (e.g. `F`→0, `M`→1).
///
/// Fitting does not learn the mapping, it only checks that the observed values fit
/// a two-valued domain covered by the table.
pub struct BinaryEncoder {
    zero: String,
    one: String,
}

impl BinaryEncoder {
    pub fn new(zero: &str, one: &str) -> Self {
        Self {
            zero: zero.to_string(),
            one: one.to_string(),
        }
    }

    pub fn fit<'a, I>(&self, column: &str, values: I) -> Result<AttributeRule, EncodingError>
    where
        I: IntoIterator<Item = &'a RawValue>,
    {
        let values: Vec<&RawValue> = values.into_iter().collect();
        // A bit counts as the level it encodes, so `M` and `1` are one value.
        let observed: BTreeSet<String> = values.iter().map(|v| self.level_of(column, v)).collect();
        if observed.len() > 2 {
            return Err(EncodingError::TooManyValues {
                column: column.to_string(),
                observed: observed.into_iter().collect(),
            });
        }
        for value in values {
            encode_binary(column, &self.zero, &self.one, value)?;
        }
        Ok(AttributeRule::Binary {
            zero: self.zero.clone(),
            one: self.one.clone(),
        })
    }

    fn level_of(&self, column: &str, value: &RawValue) -> String {
        match encode_binary(column, &self.zero, &self.one, value) {
            Ok(bit) if bit == 0.0 => self.zero.clone(),
            Ok(_) => self.one.clone(),
            Err(_) => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_observed_values_are_rejected() {
        let values: Vec<RawValue> = ["yes", "no", "maybe"].into_iter().map(RawValue::from).collect();
        let err = BinaryEncoder::new("no", "yes").fit("paid", &values).unwrap_err();
        assert_eq!(
            err,
            EncodingError::TooManyValues {
                column: "paid".into(),
                observed: vec!["maybe".into(), "no".into(), "yes".into()],
            }
        );
    }

    #[test]
    fn value_outside_the_table_is_rejected() {
        let values: Vec<RawValue> = ["U", "X"].into_iter().map(RawValue::from).collect();
        let err = BinaryEncoder::new("U", "R").fit("address", &values).unwrap_err();
        assert!(matches!(err, EncodingError::UnknownBinaryValue { ref value, .. } if value == "X"));
    }

    #[test]
    fn text_level_and_its_bit_are_the_same_value() {
        let values = vec![RawValue::from("M"), RawValue::Number(1.0), RawValue::from("F")];
        assert!(BinaryEncoder::new("F", "M").fit("sex", &values).is_ok());
    }

    #[test]
    fn single_observed_value_is_fine() {
        let values: Vec<RawValue> = ["GP", "GP"].into_iter().map(RawValue::from).collect();
        assert!(BinaryEncoder::new("GP", "MS").fit("school", &values).is_ok());
    }
}
