use crate::registry::{CheckDefinition, Registry};
use crate::report::{CheckResult, Report};
use futures::future::join_all;
use log::{debug, error, warn};
use std::sync::Arc;
use tokio::time::Instant;

impl Registry {
    /// Runs every registered check and reports the outcomes in registration
    /// order.
    ///
    /// Checks with a usable cached success are not run. All other checks run
    /// concurrently, and the checkup waits for every one of them to settle. A
    /// failing check is reported as unhealthy; it never fails the checkup.
    ///
    /// # Panics
    ///
    /// Each check runs on its own tokio task, so the returned future panics if
    /// it is polled outside a tokio runtime.
    pub async fn checkup(&self) -> Report {
        let definitions = self.snapshot();
        debug!("Running checkup of {} checks", definitions.len());

        let tasks = definitions.iter().map(|definition| {
            let definition = Arc::clone(definition);
            tokio::spawn(async move { definition.evaluate().await })
        });
        let outcomes = join_all(tasks).await;

        let results = definitions
            .iter()
            .zip(outcomes)
            .map(|(definition, outcome)| match outcome {
                Ok(result) => result,
                Err(e) => {
                    error!("{} did not complete: {}", definition.name, e);
                    CheckResult::unhealthy(
                        definition.name.clone(),
                        Some(format!("Check did not complete: {}", e)),
                    )
                }
            })
            .collect();

        Report::new(results)
    }
}

impl CheckDefinition {
    async fn evaluate(&self) -> CheckResult {
        let mut cache = self.cache.lock().await;
        if cache.is_usable(Instant::now()) {
            debug!("{} served from cache", self.name);
            return CheckResult::healthy(self.name.clone());
        }
        if cache.has_success() {
            debug!("Cached result of {} expired", self.name);
        }

        match self.check.run().await {
            Ok(()) => {
                debug!("{} succeeded", self.name);
                cache.record_success(Instant::now());
                CheckResult::healthy(self.name.clone())
            }
            Err(failure) => {
                warn!("{} failed: {}", self.name, failure);
                cache.invalidate();
                CheckResult::unhealthy(self.name.clone(), failure.into_message())
            }
        }
    }
}
