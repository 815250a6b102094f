// Domain layer - Plain data and pure rules, no I/O
pub mod analytics;
pub mod dashboard;
pub mod mission;
pub mod session;
pub mod telemetry;
pub mod view;
