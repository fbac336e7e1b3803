use thiserror::Error;

/// Contract violations raised while building, rendering or evaluating a query.
///
/// None of these are transient: they signal a predicate or schema that can
/// never succeed as written.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("cannot {action} {node}: it only supports the other execution mode")]
    ModeViolation {
        node: &'static str,
        action: &'static str,
    },

    #[error("constant of type {0} has no SQL rendering")]
    UnsupportedConstant(&'static str),

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, QueryError>;
