pub mod joined;
pub mod record;
pub mod row;
