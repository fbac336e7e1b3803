use crate::{
    core::value::{FieldValue, Value},
    records::record::Record,
};
use serde::{Deserialize, Serialize};

/// A schemaless row, as decoded from a driver result set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowData {
    pub entity: String,
    pub field_values: Vec<FieldValue>,
}

impl RowData {
    pub fn new(entity: &str, field_values: Vec<FieldValue>) -> Self {
        RowData {
            entity: entity.to_string(),
            field_values,
        }
    }

    pub fn field(&self, field: &str) -> Option<&FieldValue> {
        self.field_values
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(field))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.field_values.iter().map(|f| f.name.as_str()).collect()
    }
}

impl Record for RowData {
    fn get(&self, field: &str) -> Option<Value> {
        self.field(field)
            .map(|f| f.value.clone().unwrap_or(Value::Null))
    }
}
