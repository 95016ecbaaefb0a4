//! HTTP API handlers for rigscan-api

pub mod analyze;
pub mod health;
pub mod recommend;
pub mod report;

pub use analyze::analyze_routes;
pub use health::health_routes;
pub use recommend::recommend_routes;
pub use report::report_routes;
