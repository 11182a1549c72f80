//! A registry of named asynchronous health checks with cached results.

pub mod cache;
pub mod checks;
mod checkup;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod registry;
pub mod report;
pub mod server;

pub use cache::CachePolicy;
pub use checks::HealthCheck;
pub use error::{CheckupError, ProbeFailure};
pub use registry::{CheckOptions, Registry};
pub use report::{CheckResult, Report};
