pub mod category;
pub mod chart;
pub mod dashboard;
pub mod filter;
pub mod preferences;
pub mod store;
pub mod summary;
pub mod transaction;
