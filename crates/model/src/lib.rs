pub mod core;
pub mod macros;
pub mod records;
