use model::core::value::Value;
use std::sync::Arc;

use crate::{
    combine,
    error::{QueryError, Result},
    expr::{
        constant,
        ops::{self, BinaryOperator, CommutativeOperator, UnaryOperator},
        record::FieldNode,
    },
    query::fragment::Fragment,
    sql_text,
};

/// The untyped node behind every [`Expr`](crate::expr::Expr).
///
/// Each variant decides for itself which interpretation it supports; record
/// placeholders deliberately support only one (see `RecordNode`).
#[derive(Debug)]
pub(crate) enum Node {
    Constant(Value),
    Field(FieldNode),
    Unary {
        op: UnaryOperator,
        arg: Arc<Node>,
    },
    Binary {
        op: BinaryOperator,
        lhs: Arc<Node>,
        rhs: Arc<Node>,
    },
    Commutative {
        op: CommutativeOperator,
        args: Vec<Arc<Node>>,
    },
    Membership {
        lhs: Arc<Node>,
        candidates: Arc<Node>,
    },
}

impl Node {
    pub(crate) fn evaluate(&self) -> Result<Value> {
        match self {
            Node::Constant(value) => Ok(value.clone()),
            Node::Field(field) => field.evaluate(),
            Node::Unary { op, arg } => (op.eval)(arg.evaluate()?),
            Node::Binary { op, lhs, rhs } => (op.eval)(lhs.evaluate()?, rhs.evaluate()?),
            Node::Commutative { op, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.evaluate())
                    .collect::<Result<Vec<_>>>()?;
                (op.eval)(&values)
            }
            Node::Membership { lhs, candidates } => {
                let needle = lhs.evaluate()?;
                match candidates.evaluate()? {
                    Value::List(items) => Ok(ops::membership(&needle, &items)),
                    other => Err(QueryError::TypeMismatch {
                        expected: "list",
                        actual: other.type_name(),
                    }),
                }
            }
        }
    }

    pub(crate) fn compile(&self) -> Result<Fragment> {
        match self {
            Node::Constant(value) => constant::compile(value),
            Node::Field(field) => field.compile(),
            Node::Unary { op, arg } => Ok(combine!(
                sql_text!("({}", op.prefix),
                arg.compile()?,
                sql_text!("{})", op.suffix),
            )),
            Node::Binary { op, lhs, rhs } => Ok(combine!(
                Fragment::text("("),
                lhs.compile()?,
                sql_text!(" {} ", op.infix),
                rhs.compile()?,
                Fragment::text(")"),
            )),
            Node::Commutative { op, args } => {
                if args.is_empty() {
                    return Ok(Fragment::text(op.identity));
                }
                let operands = args
                    .iter()
                    .map(|arg| arg.compile())
                    .collect::<Result<Vec<_>>>()?;
                Ok(combine!(
                    Fragment::text("("),
                    Fragment::join(operands, &format!(" {} ", op.infix)),
                    Fragment::text(")"),
                ))
            }
            Node::Membership { lhs, candidates } => Ok(combine!(
                Fragment::text("("),
                lhs.compile()?,
                Fragment::text(" IN ("),
                candidates.compile()?,
                Fragment::text("))"),
            )),
        }
    }
}
