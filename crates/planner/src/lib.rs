//! Boolean predicates written once and executed against two interchangeable
//! backends: compiled into parameterized SQL over a mapped table, or evaluated
//! directly over an in-memory collection.

pub mod error;
pub mod expr;
pub mod query;
pub mod queryable;

pub use error::{QueryError, Result};
pub use expr::{
    Expr, IntoExpr, Scalar,
    ops::{and, constant, equals, is_not_null, is_null, is_one_of, not, or},
    record::RecordExpr,
};
pub use query::{
    dialect::{Dialect, Positional, Postgres},
    fragment::Fragment,
};
pub use queryable::{
    Queryable,
    mapping::{ColumnMapping, TableMapping},
    object::ObjectQueryable,
    sql::SqlQueryable,
};
