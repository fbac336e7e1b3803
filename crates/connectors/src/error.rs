use planner::error::QueryError;
use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any Postgres driver error.
    #[error("Postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// The query could not be rendered.
    #[error("Query build error: {0}")]
    Query(#[from] QueryError),

    /// The connection string could not be parsed.
    #[error("Invalid connection URL: {0}")]
    InvalidUrl(String),

    /// A bound value cannot be represented as the parameter type the server expects.
    #[error("Cannot bind {value} as Postgres type {pg_type}")]
    Coercion { value: String, pg_type: String },

    /// The statement declares a different number of parameters than were bound.
    #[error("Statement expects {expected} parameters but {actual} were bound")]
    BindingCount { expected: usize, actual: usize },
}
