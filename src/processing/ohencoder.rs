use crate::data_loading::RawValue;
use crate::processing::schema::AttributeRule;
use std::collections::BTreeSet;

/// One-hot ("dummy") encoder for a categorical column.
///
/// Every observed level becomes its own indicator column; no reference level is
/// dropped. Levels are kept in lexical order so the expanded layout is reproducible.
pub struct OneHotEncoder;

impl OneHotEncoder {
    /// Collects the distinct levels of a column.
    pub fn fit<'a, I>(&self, values: I) -> AttributeRule
    where
        I: IntoIterator<Item = &'a RawValue>,
    {
        let levels: BTreeSet<String> = values.into_iter().map(RawValue::to_string).collect();
        AttributeRule::Categorical {
            levels: levels.into_iter().collect(),
        }
    }
}
