//! A filterable source of records, realized either as a SQL query plan or as
//! an in-memory collection.

use model::records::{joined::Joined, record::Record};

use crate::{
    error::Result,
    expr::{Expr, record::RecordExpr},
};

pub mod mapping;
pub mod object;
pub mod sql;

pub trait Queryable<T: Record>: Sized {
    /// The same backend over another record type.
    type Of<U: Record>: Queryable<U>;

    /// Keeps the records for which `predicate` holds. Never mutates `self`.
    #[doc(alias = "where")]
    fn filter<F>(&self, predicate: F) -> Result<Self>
    where
        F: Fn(&RecordExpr<T>) -> Expr<bool>;

    /// Pairs every record of `self` with every record of `other` satisfying `on`.
    fn join<U, F>(&self, other: &Self::Of<U>, on: F) -> Result<Self::Of<Joined<T, U>>>
    where
        U: Record,
        F: Fn(&RecordExpr<T>, &RecordExpr<U>) -> Expr<bool>;
}
