//! Defines the `Dialect` trait for database-specific placeholder syntax.

pub trait Dialect: Send + Sync {
    /// Placeholder text for the bound parameter at zero-based `index`.
    fn get_placeholder(&self, index: usize) -> String;

    /// Human-readable dialect name, used in logs.
    fn name(&self) -> String;
}

/// Anonymous positional placeholders (`?`), as accepted by MySQL, SQLite and
/// most query-builder drivers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Positional;

impl Dialect for Positional {
    fn get_placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    fn name(&self) -> String {
        "Positional".into()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn get_placeholder(&self, index: usize) -> String {
        // PostgreSQL placeholders are 1-based.
        format!("${}", index + 1)
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}
