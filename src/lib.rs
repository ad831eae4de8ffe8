pub mod configuration;
pub mod connectors;
pub mod models;
pub mod services;
pub mod telemetry;
