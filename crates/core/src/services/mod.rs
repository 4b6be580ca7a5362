pub mod chart_service;
pub mod dashboard_service;
pub mod filter_service;
pub mod format_service;
