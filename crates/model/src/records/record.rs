use crate::core::value::Value;
use std::sync::Arc;

/// A logical record whose fields can be read by name.
///
/// Field names are the *logical* names used by predicates, independent of
/// the physical column names a table mapping may translate them to.
pub trait Record: Send + Sync + 'static {
    /// Returns the value stored under `field`, or `None` when the record
    /// has no such field. `Option` fields holding `None` read as `Value::Null`.
    fn get(&self, field: &str) -> Option<Value>;

    /// Like [`Record::get`] but folds a missing field into `Value::Null`.
    fn get_value(&self, field: &str) -> Value {
        self.get(field).unwrap_or(Value::Null)
    }
}

impl<R: Record + ?Sized> Record for Arc<R> {
    fn get(&self, field: &str) -> Option<Value> {
        (**self).get(field)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn get(&self, field: &str) -> Option<Value> {
        (**self).get(field)
    }
}
