use crate::{core::value::Value, records::record::Record};
use std::sync::Arc;

/// A pair of records produced by an in-memory join.
///
/// Fields are addressed with a side prefix: `left.<field>` or `right.<field>`.
#[derive(Debug)]
pub struct Joined<L, R> {
    pub left: Arc<L>,
    pub right: Arc<R>,
}

impl<L, R> Joined<L, R> {
    pub fn new(left: Arc<L>, right: Arc<R>) -> Self {
        Joined { left, right }
    }
}

impl<L, R> Clone for Joined<L, R> {
    fn clone(&self) -> Self {
        Joined {
            left: Arc::clone(&self.left),
            right: Arc::clone(&self.right),
        }
    }
}

impl<L: Record, R: Record> Record for Joined<L, R> {
    fn get(&self, field: &str) -> Option<Value> {
        let (side, rest) = field.split_once('.')?;
        match side {
            "left" => self.left.get(rest),
            "right" => self.right.get(rest),
            _ => None,
        }
    }
}
