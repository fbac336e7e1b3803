//! The "current row" of a predicate and field projection off it.
//!
//! A record placeholder exists in exactly one of two forms. The SQL form is a
//! symbolic alias: it renders but refuses to evaluate. The object form wraps a
//! concrete record: it evaluates but refuses to render. A predicate built for
//! one backend therefore fails loudly, instead of quietly misbehaving, when it
//! is run against the other.

use model::{core::value::Value, records::record::Record};
use std::{fmt, marker::PhantomData, sync::Arc};

use crate::{
    error::{QueryError, Result},
    expr::{Expr, node::Node},
    query::fragment::Fragment,
    sql_text,
};

pub(crate) enum RecordNode {
    Sql { alias: String },
    Object(Arc<dyn Record>),
}

impl RecordNode {
    fn evaluate(&self) -> Result<&dyn Record> {
        match self {
            RecordNode::Sql { .. } => Err(QueryError::ModeViolation {
                node: "SQL record",
                action: "evaluate",
            }),
            RecordNode::Object(record) => Ok(record.as_ref()),
        }
    }

    fn compile(&self) -> Result<Fragment> {
        match self {
            RecordNode::Sql { alias } => Ok(Fragment::text(alias.as_str())),
            RecordNode::Object(_) => Err(QueryError::ModeViolation {
                node: "object record",
                action: "render",
            }),
        }
    }
}

impl fmt::Debug for RecordNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordNode::Sql { alias } => f.debug_struct("Sql").field("alias", alias).finish(),
            RecordNode::Object(_) => f.write_str("Object(..)"),
        }
    }
}

/// Projection of one logical field off a record placeholder.
#[derive(Debug)]
pub(crate) struct FieldNode {
    record: Arc<RecordNode>,
    name: String,
}

impl FieldNode {
    pub(crate) fn evaluate(&self) -> Result<Value> {
        Ok(self.record.evaluate()?.get_value(&self.name))
    }

    pub(crate) fn compile(&self) -> Result<Fragment> {
        Ok(self
            .record
            .compile()?
            .combine(sql_text!(".{}", self.name)))
    }
}

/// The record a predicate is written against.
pub struct RecordExpr<R> {
    node: Arc<RecordNode>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> RecordExpr<R> {
    /// A symbolic row, rendered as `alias`.
    pub fn sql(alias: impl Into<String>) -> Self {
        Self::from_node(RecordNode::Sql {
            alias: alias.into(),
        })
    }

    /// A concrete in-memory record.
    pub fn object(record: Arc<R>) -> Self {
        Self::from_node(RecordNode::Object(record))
    }

    fn from_node(node: RecordNode) -> Self {
        RecordExpr {
            node: Arc::new(node),
            _record: PhantomData,
        }
    }

    /// Projects the logical field `name`, typed as `T`.
    pub fn field<T>(&self, name: &str) -> Expr<T> {
        Expr::from_node(Node::Field(FieldNode {
            record: Arc::clone(&self.node),
            name: name.to_string(),
        }))
    }

    /// Fails with a mode violation for SQL-side records.
    pub fn evaluate(&self) -> Result<&dyn Record> {
        self.node.evaluate()
    }

    /// Fails with a mode violation for object-side records.
    pub fn compile(&self) -> Result<Fragment> {
        self.node.compile()
    }
}

impl<R> Clone for RecordExpr<R> {
    fn clone(&self) -> Self {
        RecordExpr {
            node: Arc::clone(&self.node),
            _record: PhantomData,
        }
    }
}

impl<R> fmt::Debug for RecordExpr<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordExpr").field(&self.node).finish()
    }
}
