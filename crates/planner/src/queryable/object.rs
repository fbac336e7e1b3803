//! The in-memory realization of [`Queryable`]: an immutable list, eagerly
//! filtered on every call.

use model::{
    core::value::Value,
    records::{joined::Joined, record::Record},
};
use std::{fmt, sync::Arc};
use tracing::debug;

use crate::{
    error::{QueryError, Result},
    expr::{Expr, record::RecordExpr},
    queryable::Queryable,
};

pub struct ObjectQueryable<T> {
    items: Vec<Arc<T>>,
}

impl<T: Record> ObjectQueryable<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self::from_shared(items.into_iter().map(Arc::new).collect())
    }

    pub fn from_shared(items: Vec<Arc<T>>) -> Self {
        ObjectQueryable { items }
    }

    pub fn items(&self) -> &[Arc<T>] {
        &self.items
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn retain<F>(&self, predicate: F) -> Result<Vec<Arc<T>>>
    where
        F: Fn(&RecordExpr<T>) -> Expr<bool>,
    {
        let mut kept = Vec::new();
        for item in &self.items {
            let record = RecordExpr::object(Arc::clone(item));
            if holds(&predicate(&record))? {
                kept.push(Arc::clone(item));
            }
        }
        Ok(kept)
    }
}

/// A WHERE clause keeps a row only when the predicate is TRUE; FALSE and
/// NULL both drop it.
fn holds(predicate: &Expr<bool>) -> Result<bool> {
    match predicate.evaluate()? {
        Value::Boolean(b) => Ok(b),
        Value::Null => Ok(false),
        other => Err(QueryError::TypeMismatch {
            expected: "boolean",
            actual: other.type_name(),
        }),
    }
}

impl<T: Record> Queryable<T> for ObjectQueryable<T> {
    type Of<U: Record> = ObjectQueryable<U>;

    fn filter<F>(&self, predicate: F) -> Result<Self>
    where
        F: Fn(&RecordExpr<T>) -> Expr<bool>,
    {
        let kept = self.retain(predicate)?;
        debug!(kept = kept.len(), total = self.items.len(), "filtered in-memory collection");
        Ok(Self::from_shared(kept))
    }

    /// Nested-loop join: for each left record, the right collection is
    /// filtered by `on` bound to that record, and each survivor is paired.
    fn join<U, F>(&self, other: &ObjectQueryable<U>, on: F) -> Result<ObjectQueryable<Joined<T, U>>>
    where
        U: Record,
        F: Fn(&RecordExpr<T>, &RecordExpr<U>) -> Expr<bool>,
    {
        let mut pairs = Vec::new();
        for left in &self.items {
            let bound = RecordExpr::object(Arc::clone(left));
            for right in other.retain(|u| on(&bound, u))? {
                pairs.push(Joined::new(Arc::clone(left), right));
            }
        }
        debug!(
            left = self.items.len(),
            right = other.items.len(),
            pairs = pairs.len(),
            "joined in-memory collections"
        );
        Ok(ObjectQueryable::new(pairs))
    }
}

impl<T> Clone for ObjectQueryable<T> {
    fn clone(&self) -> Self {
        ObjectQueryable {
            items: self.items.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ObjectQueryable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: Record> FromIterator<T> for ObjectQueryable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}
