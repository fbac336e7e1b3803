pub mod executor;
pub mod params;
pub mod row;
pub mod utils;

pub use executor::PgExecutor;
