use model::core::value::Value;

use crate::{
    error::{QueryError, Result},
    query::fragment::Fragment,
};

/// Renders a constant as bound parameters. Lists bind one placeholder per
/// element and render comma-joined, so `[]` renders as nothing at all.
pub(crate) fn compile(value: &Value) -> Result<Fragment> {
    match value {
        Value::List(items) => {
            for item in items {
                ensure_bindable(item)?;
            }
            Ok(Fragment::params(items.iter().cloned()))
        }
        other => {
            ensure_bindable(other)?;
            Ok(Fragment::param(other.clone()))
        }
    }
}

// NULL is never bound: null tests go through IS NULL, and `= NULL` would
// silently match nothing.
fn ensure_bindable(value: &Value) -> Result<()> {
    match value {
        Value::Null | Value::Json(_) | Value::List(_) => {
            Err(QueryError::UnsupportedConstant(value.type_name()))
        }
        _ => Ok(()),
    }
}
