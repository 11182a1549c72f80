//! The ordered set of registered health checks.

use crate::cache::{CachePolicy, CacheSlot};
use crate::checks::HealthCheck;
use crate::error::CheckupError;
use log::debug;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;

/// Options accepted when registering a check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub cache: CachePolicy,
}

impl CheckOptions {
    /// Sets the maximum age of a cached success in milliseconds. 0 keeps a
    /// success until the check fails.
    pub fn cache_max_age(mut self, millis: u64) -> Self {
        self.cache = CachePolicy::from_max_age_millis(millis);
        self
    }

    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache = policy;
        self
    }
}

pub(crate) struct CheckDefinition {
    pub(crate) name: String,
    pub(crate) check: Arc<dyn HealthCheck>,
    /// Held for the whole decide, probe and record sequence of a checkup.
    pub(crate) cache: Mutex<CacheSlot>,
}

/// Health checks in registration order.
#[derive(Default)]
pub struct Registry {
    checks: RwLock<Vec<Arc<CheckDefinition>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a check that caches its successes until it fails.
    pub fn add_check<C>(&self, name: impl Into<String>, check: C) -> Result<(), CheckupError>
    where
        C: HealthCheck + 'static,
    {
        self.add_check_with_options(name, check, CheckOptions::default())
    }

    /// Registers a check, replacing any check with the same name while keeping
    /// its position in the report.
    pub fn add_check_with_options<C>(
        &self,
        name: impl Into<String>,
        check: C,
        options: CheckOptions,
    ) -> Result<(), CheckupError>
    where
        C: HealthCheck + 'static,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CheckupError::InvalidArgument(
                "check name must not be empty".to_string(),
            ));
        }
        if !check.is_enabled() {
            return Err(CheckupError::InvalidArgument(format!(
                "check `{}` has nothing to run",
                name
            )));
        }

        let definition = Arc::new(CheckDefinition {
            name,
            check: Arc::new(check),
            cache: Mutex::new(CacheSlot::new(options.cache)),
        });

        let mut checks = self.checks.write().unwrap_or_else(PoisonError::into_inner);
        match checks.iter_mut().find(|d| d.name == definition.name) {
            Some(existing) => {
                debug!("Replacing check {}", definition.name);
                *existing = definition;
            }
            None => {
                debug!(
                    "Adding check {} with cache policy {:?}",
                    definition.name, options.cache
                );
                checks.push(definition);
            }
        }
        Ok(())
    }

    /// Removes every registered check.
    pub fn reset_checks(&self) {
        debug!("Resetting checks");
        self.checks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.checks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The names of the registered checks, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.checks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|d| d.name.clone())
            .collect()
    }

    pub(crate) fn snapshot(&self) -> Vec<Arc<CheckDefinition>> {
        self.checks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
