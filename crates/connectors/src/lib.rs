//! Execution driver adapters: run a finalized `(sql, bindings)` pair against a
//! live store and decode the result rows.

pub mod error;
pub mod sql;
