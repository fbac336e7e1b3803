//! Typed expression trees with two interpretations: direct evaluation and
//! compilation into a parameterized SQL [`Fragment`].
//!
//! Every tree is immutable and reference counted, so subtrees can be shared
//! between queries (and threads) without copying.

use chrono::{DateTime, NaiveDate, Utc};
use model::core::value::Value;
use std::{fmt, marker::PhantomData, sync::Arc};
use uuid::Uuid;

use crate::{error::Result, expr::node::Node, query::fragment::Fragment};

pub(crate) mod constant;
pub(crate) mod node;
pub mod ops;
pub mod record;

/// An expression producing a value of logical type `T`.
///
/// `T` only drives which operands are accepted at build time; at run time
/// every node produces a [`Value`], and any value may be `NULL`.
pub struct Expr<T> {
    node: Arc<Node>,
    _type: PhantomData<fn() -> T>,
}

impl<T> Expr<T> {
    pub(crate) fn from_node(node: Node) -> Self {
        Self::from_shared(Arc::new(node))
    }

    pub(crate) fn from_shared(node: Arc<Node>) -> Self {
        Expr {
            node,
            _type: PhantomData,
        }
    }

    pub(crate) fn node(&self) -> Arc<Node> {
        Arc::clone(&self.node)
    }

    /// Computes the value directly. Fails with a mode violation when the tree
    /// references a SQL-side record.
    pub fn evaluate(&self) -> Result<Value> {
        self.node.evaluate()
    }

    /// Renders the tree into SQL text plus bindings. Fails with a mode
    /// violation when the tree references an in-memory record.
    pub fn compile(&self) -> Result<Fragment> {
        self.node.compile()
    }

    pub fn equals(&self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        ops::equals::<T>(self.clone(), rhs)
    }

    pub fn is_one_of(&self, candidates: impl IntoExpr<Vec<T>>) -> Expr<bool> {
        ops::is_one_of::<T>(self.clone(), candidates)
    }

    pub fn is_null(&self) -> Expr<bool> {
        ops::is_null::<T>(self.clone())
    }

    pub fn is_not_null(&self) -> Expr<bool> {
        ops::is_not_null::<T>(self.clone())
    }
}

#[allow(clippy::should_implement_trait)]
impl Expr<bool> {
    pub fn and(&self, rhs: impl IntoExpr<bool>) -> Expr<bool> {
        ops::and([self.clone(), rhs.into_expr()])
    }

    pub fn or(&self, rhs: impl IntoExpr<bool>) -> Expr<bool> {
        ops::or([self.clone(), rhs.into_expr()])
    }

    pub fn not(&self) -> Expr<bool> {
        ops::not(self.clone())
    }
}

impl<T> Clone for Expr<T> {
    fn clone(&self) -> Self {
        Self::from_shared(self.node())
    }
}

impl<T> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expr").field(&self.node).finish()
    }
}

/// Anything accepted where an `Expr<T>` is expected: the expression itself or
/// a raw literal, which is wrapped into a constant.
pub trait IntoExpr<T> {
    fn into_expr(self) -> Expr<T>;
}

impl<T> IntoExpr<T> for Expr<T> {
    fn into_expr(self) -> Expr<T> {
        self
    }
}

/// A raw value that can stand for a constant of logical type `T`.
pub trait Scalar<T>: Into<Value> {}

fn literal<T>(value: impl Scalar<T>) -> Expr<T> {
    Expr::from_node(Node::Constant(value.into()))
}

macro_rules! impl_scalar {
    ($($src:ty => $logical:ty),* $(,)?) => {
        $(
            impl Scalar<$logical> for $src {}

            impl IntoExpr<$logical> for $src {
                fn into_expr(self) -> Expr<$logical> {
                    literal(self)
                }
            }
        )*
    };
}

impl_scalar! {
    i32 => i32,
    i64 => i64,
    u32 => u32,
    u64 => u64,
    f64 => f64,
    bool => bool,
    String => String,
    &str => String,
    &String => String,
    Uuid => Uuid,
    NaiveDate => NaiveDate,
    DateTime<Utc> => DateTime<Utc>,
}

// Sequences of literals wrap element-wise into a list constant, which renders
// as one independently bound placeholder per element.
impl<T, V: Scalar<T>> IntoExpr<Vec<T>> for Vec<V> {
    fn into_expr(self) -> Expr<Vec<T>> {
        Expr::from_node(Node::Constant(Value::List(
            self.into_iter().map(Into::into).collect(),
        )))
    }
}

impl<T, V: Scalar<T>, const N: usize> IntoExpr<Vec<T>> for [V; N] {
    fn into_expr(self) -> Expr<Vec<T>> {
        Vec::from(self).into_expr()
    }
}

impl<T, V: Scalar<T> + Clone> IntoExpr<Vec<T>> for &[V] {
    fn into_expr(self) -> Expr<Vec<T>> {
        self.to_vec().into_expr()
    }
}
