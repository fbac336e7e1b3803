//! Operator templates and the built-in predicate builders.
//!
//! An operator pairs an evaluation function with the text used to render it.
//! The built-ins below are ordinary instances of these templates, and callers
//! can define their own through [`unary_op`], [`binary_op`] and
//! [`commutative_op`].
//!
//! Evaluation follows SQL three-valued logic: comparisons against `NULL`
//! yield `NULL`, and `NULL` propagates through `NOT`, `AND` and `OR` the way
//! a database would propagate it. This keeps the in-memory backend in step
//! with the SQL backend for nullable fields.

use model::core::value::Value;

use crate::{
    error::{QueryError, Result},
    expr::{Expr, IntoExpr, node::Node},
};

/// Rendered as `(<prefix><arg><suffix>)`.
#[derive(Debug, Clone, Copy)]
pub struct UnaryOperator {
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub eval: fn(Value) -> Result<Value>,
}

/// Rendered as `(<lhs> <infix> <rhs>)`.
#[derive(Debug, Clone, Copy)]
pub struct BinaryOperator {
    pub infix: &'static str,
    pub eval: fn(Value, Value) -> Result<Value>,
}

/// Rendered as `(<a> <infix> <b> <infix> ...)`, or as `identity` when there
/// are no operands.
#[derive(Debug, Clone, Copy)]
pub struct CommutativeOperator {
    pub infix: &'static str,
    pub identity: &'static str,
    pub eval: fn(&[Value]) -> Result<Value>,
}

pub const EQUALS: BinaryOperator = BinaryOperator {
    infix: "=",
    eval: eval_equals,
};

pub const AND: CommutativeOperator = CommutativeOperator {
    infix: "AND",
    identity: "TRUE",
    eval: eval_and,
};

pub const OR: CommutativeOperator = CommutativeOperator {
    infix: "OR",
    identity: "FALSE",
    eval: eval_or,
};

pub const NOT: UnaryOperator = UnaryOperator {
    prefix: "NOT ",
    suffix: "",
    eval: eval_not,
};

pub const IS_NULL: UnaryOperator = UnaryOperator {
    prefix: "",
    suffix: " IS NULL",
    eval: |value| Ok(Value::Boolean(value.is_null())),
};

pub const IS_NOT_NULL: UnaryOperator = UnaryOperator {
    prefix: "",
    suffix: " IS NOT NULL",
    eval: |value| Ok(Value::Boolean(!value.is_null())),
};

pub fn unary_op<A, R>(op: UnaryOperator, arg: impl IntoExpr<A>) -> Expr<R> {
    Expr::from_node(Node::Unary {
        op,
        arg: arg.into_expr().node(),
    })
}

pub fn binary_op<L, Rhs, R>(
    op: BinaryOperator,
    lhs: impl IntoExpr<L>,
    rhs: impl IntoExpr<Rhs>,
) -> Expr<R> {
    Expr::from_node(Node::Binary {
        op,
        lhs: lhs.into_expr().node(),
        rhs: rhs.into_expr().node(),
    })
}

pub fn commutative_op<A, R, I>(op: CommutativeOperator, args: I) -> Expr<R>
where
    I: IntoIterator,
    I::Item: IntoExpr<A>,
{
    Expr::from_node(Node::Commutative {
        op,
        args: args.into_iter().map(|arg| arg.into_expr().node()).collect(),
    })
}

/// Wraps a raw value (or a sequence of them) as a constant expression.
pub fn constant<T>(value: impl IntoExpr<T>) -> Expr<T> {
    value.into_expr()
}

pub fn equals<T>(lhs: impl IntoExpr<T>, rhs: impl IntoExpr<T>) -> Expr<bool> {
    binary_op::<T, T, bool>(EQUALS, lhs, rhs)
}

/// Conjunction of any number of predicates; `TRUE` when empty.
pub fn and<I>(args: I) -> Expr<bool>
where
    I: IntoIterator,
    I::Item: IntoExpr<bool>,
{
    commutative_op::<bool, bool, I>(AND, args)
}

/// Disjunction of any number of predicates; `FALSE` when empty.
pub fn or<I>(args: I) -> Expr<bool>
where
    I: IntoIterator,
    I::Item: IntoExpr<bool>,
{
    commutative_op::<bool, bool, I>(OR, args)
}

pub fn not(arg: impl IntoExpr<bool>) -> Expr<bool> {
    unary_op::<bool, bool>(NOT, arg)
}

pub fn is_null<T>(arg: impl IntoExpr<T>) -> Expr<bool> {
    unary_op::<T, bool>(IS_NULL, arg)
}

pub fn is_not_null<T>(arg: impl IntoExpr<T>) -> Expr<bool> {
    unary_op::<T, bool>(IS_NOT_NULL, arg)
}

/// `lhs IN (candidates...)`, matched by linear scan with scalar equality.
pub fn is_one_of<T>(lhs: impl IntoExpr<T>, candidates: impl IntoExpr<Vec<T>>) -> Expr<bool> {
    Expr::from_node(Node::Membership {
        lhs: lhs.into_expr().node(),
        candidates: candidates.into_expr().node(),
    })
}

pub(crate) fn membership(needle: &Value, candidates: &[Value]) -> Value {
    if needle.is_null() {
        return Value::Null;
    }
    Value::Boolean(candidates.iter().any(|candidate| needle.equal(candidate)))
}

fn eval_equals(lhs: Value, rhs: Value) -> Result<Value> {
    if lhs.is_null() || rhs.is_null() {
        return Ok(Value::Null);
    }
    Ok(Value::Boolean(lhs.equal(&rhs)))
}

fn eval_not(value: Value) -> Result<Value> {
    match value {
        Value::Boolean(b) => Ok(Value::Boolean(!b)),
        Value::Null => Ok(Value::Null),
        other => Err(mismatch(&other)),
    }
}

fn eval_and(values: &[Value]) -> Result<Value> {
    fold_logical(values, false)
}

fn eval_or(values: &[Value]) -> Result<Value> {
    fold_logical(values, true)
}

// `dominant` is the operand value that decides the result on its own:
// false for AND, true for OR.
fn fold_logical(values: &[Value], dominant: bool) -> Result<Value> {
    let mut decided = false;
    let mut unknown = false;
    for value in values {
        match value {
            Value::Boolean(b) if *b == dominant => decided = true,
            Value::Boolean(_) => {}
            Value::Null => unknown = true,
            other => return Err(mismatch(other)),
        }
    }

    Ok(if decided {
        Value::Boolean(dominant)
    } else if unknown {
        Value::Null
    } else {
        Value::Boolean(!dominant)
    })
}

fn mismatch(value: &Value) -> QueryError {
    QueryError::TypeMismatch {
        expected: "boolean",
        actual: value.type_name(),
    }
}
