//! Mailmask Observability
//!
//! This crate provides observability features:
//! - Metrics collection (Prometheus) for masking and demasking runs
//! - Structured logging setup

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LoggingConfig};
pub use metrics::Metrics;
