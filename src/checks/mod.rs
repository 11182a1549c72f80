mod file_check;
mod url_check;

pub use file_check::FileCheck;
pub use url_check::UrlCheck;

use crate::config::Config;
use crate::error::{CheckupError, ProbeFailure};
use crate::registry::{CheckOptions, Registry};
use async_trait::async_trait;
use log::debug;
use std::future::Future;

/// A probe that reports whether some part of the system is healthy.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Whether the probe has anything to run. A disabled probe is rejected at
    /// registration.
    fn is_enabled(&self) -> bool {
        true
    }

    async fn run(&self) -> Result<(), ProbeFailure>;
}

/// A health check backed by an async closure.
pub struct FnCheck<F> {
    probe: F,
}

/// Wraps an async closure so it can be registered as a health check.
///
/// ```
/// use healthcheckup::checks::from_fn;
/// use healthcheckup::ProbeFailure;
///
/// let check = from_fn(|| async { Err::<(), _>(ProbeFailure::new("unhealthy by nature")) });
/// # let _ = check;
/// ```
pub fn from_fn<F, Fut>(probe: F) -> FnCheck<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), ProbeFailure>> + Send + 'static,
{
    FnCheck { probe }
}

#[async_trait]
impl<F, Fut> HealthCheck for FnCheck<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), ProbeFailure>> + Send + 'static,
{
    async fn run(&self) -> Result<(), ProbeFailure> {
        (self.probe)().await
    }
}

/// Registers the built-in checks that are enabled in the given configuration.
pub fn register_configured(registry: &Registry, config: &Config) -> Result<(), CheckupError> {
    let file_check = FileCheck::new(&config.checks.file_check);
    if file_check.is_enabled() {
        registry.add_check_with_options(
            FileCheck::NAME,
            file_check,
            CheckOptions::default().cache_max_age(config.checks.file_check.cache_max_age),
        )?;
    } else {
        debug!("{} has no files configured, skipping", FileCheck::NAME);
    }

    let url_check = UrlCheck::new(&config.checks.url_check);
    if url_check.is_enabled() {
        registry.add_check_with_options(
            UrlCheck::NAME,
            url_check,
            CheckOptions::default().cache_max_age(config.checks.url_check.cache_max_age),
        )?;
    } else {
        debug!("{} has no URLs configured, skipping", UrlCheck::NAME);
    }

    Ok(())
}
