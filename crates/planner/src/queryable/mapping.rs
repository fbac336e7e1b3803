//! Logical field to physical column translation for a queryable table.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// The logical name predicates refer to.
    pub field: String,

    /// The physical column, when it differs from `field`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl ColumnMapping {
    pub fn new(field: impl Into<String>) -> Self {
        ColumnMapping {
            field: field.into(),
            column: None,
        }
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn physical_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.field)
    }

    /// `<column> as <field>` when the names differ, else the bare name.
    pub fn select_item(&self) -> String {
        match self.column.as_deref() {
            Some(column) if column != self.field => format!("{column} as {}", self.field),
            _ => self.field.clone(),
        }
    }
}

/// Ordered field list. SELECT column order follows declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableMapping {
    columns: Vec<ColumnMapping>,
}

impl TableMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field stored under its own name.
    pub fn field(self, field: impl Into<String>) -> Self {
        self.with(ColumnMapping::new(field))
    }

    /// A field stored under a different physical column name.
    pub fn mapped(self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.with(ColumnMapping::new(field).column(column))
    }

    pub fn with(mut self, mapping: ColumnMapping) -> Self {
        self.columns.push(mapping);
        self
    }

    pub fn columns(&self) -> &[ColumnMapping] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_for(&self, field: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|mapping| mapping.field == field)
            .map(ColumnMapping::physical_name)
    }

    /// The projection list for a SELECT; `*` when no fields are declared.
    pub fn select_list(&self) -> String {
        if self.columns.is_empty() {
            return "*".to_string();
        }
        self.columns
            .iter()
            .map(ColumnMapping::select_item)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<ColumnMapping> for TableMapping {
    fn from_iter<I: IntoIterator<Item = ColumnMapping>>(iter: I) -> Self {
        TableMapping {
            columns: iter.into_iter().collect(),
        }
    }
}
