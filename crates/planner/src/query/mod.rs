pub mod dialect;
pub mod fragment;
pub mod macros;
pub mod renderer;
