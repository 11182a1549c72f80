use std::sync::LazyLock;
use std::{env, fmt};

pub struct Config {
    pub server: ServerConfig,
    pub checks: ChecksConfig,
}

impl Config {
    pub fn new() -> Self {
        let address =
            env::var("HEALTHCHECKUP_SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_var("HEALTHCHECKUP_SERVER_PORT", 8080);

        Config {
            server: ServerConfig { address, port },
            checks: ChecksConfig {
                file_check: FileCheckConfig {
                    files: list_var("HEALTHCHECKUP_FILECHECK_FILES"),
                    cache_max_age: parse_var("HEALTHCHECKUP_FILECHECK_CACHE_MAX_AGE", 0),
                },
                url_check: UrlCheckConfig {
                    urls: list_var("HEALTHCHECKUP_URLCHECK_URLS"),
                    timeout: parse_var("HEALTHCHECKUP_URLCHECK_TIMEOUT", 5),
                    cache_max_age: parse_var("HEALTHCHECKUP_URLCHECK_CACHE_MAX_AGE", 0),
                },
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server)
            .field("checks", &self.checks)
            .finish()
    }
}

pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

impl fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http://{}:{}", self.address, self.port)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("address", &self.address)
            .field("port", &self.port)
            .finish()
    }
}

#[derive(Debug)]
pub struct ChecksConfig {
    pub file_check: FileCheckConfig,
    pub url_check: UrlCheckConfig,
}

#[derive(Debug, Clone)]
pub struct FileCheckConfig {
    pub files: Vec<String>,
    /// Maximum age of a cached success in milliseconds, 0 caches until failure.
    pub cache_max_age: u64,
}

#[derive(Debug, Clone)]
pub struct UrlCheckConfig {
    pub urls: Vec<String>,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Maximum age of a cached success in milliseconds, 0 caches until failure.
    pub cache_max_age: u64,
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::new);

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a comma separated list, skipping empty items.
fn list_var(name: &str) -> Vec<String> {
    env::var(name)
        .unwrap_or_default()
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().to_string())
        .collect()
}
