use crate::checks::HealthCheck;
use crate::config::FileCheckConfig;
use crate::error::ProbeFailure;
use async_trait::async_trait;
use log::debug;
use std::fs;

/// Checks that a list of files exist and are not empty.
pub struct FileCheck {
    files: Vec<String>,
}

impl FileCheck {
    pub const NAME: &'static str = "FileCheck";

    pub fn new(config: &FileCheckConfig) -> Self {
        Self {
            files: config.files.clone(),
        }
    }
}

#[async_trait]
impl HealthCheck for FileCheck {
    fn is_enabled(&self) -> bool {
        !self.files.is_empty()
    }

    async fn run(&self) -> Result<(), ProbeFailure> {
        debug!("Checking {} files", self.files.len());

        for file in &self.files {
            let metadata =
                fs::metadata(file).map_err(|e| format!("Failed to access {}: {}", file, e))?;
            if metadata.len() == 0 {
                return Err(format!("File {} is empty", file).into());
            }
        }
        Ok(())
    }
}
