use crate::error::{MailSiftError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;
const MAX_REDIRECT_LIMIT: usize = 100;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Seconds; fractional values are allowed.
    pub timeout: f64,
    pub user_agent: String,
    pub max_redirects: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_response_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub create_parent_dirs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("mailsift/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
            max_response_bytes: None,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MailSiftError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| MailSiftError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| MailSiftError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["mailsift.toml", ".mailsift.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(timeout) = cli_args.timeout {
            self.fetch.timeout = timeout;
        }

        if let Some(create_dirs) = cli_args.create_parent_dirs {
            self.output.create_parent_dirs = create_dirs;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| MailSiftError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| MailSiftError::from_io(e, path))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.fetch.timeout.is_finite() || self.fetch.timeout <= 0.0 {
            return Err(MailSiftError::Config {
                message: format!(
                    "Fetch timeout must be a positive number of seconds, got {}",
                    self.fetch.timeout
                ),
            });
        }

        // Duration::from_secs_f64 panics past u64::MAX seconds.
        if Duration::try_from_secs_f64(self.fetch.timeout).is_err() {
            return Err(MailSiftError::Config {
                message: format!("Fetch timeout is out of range: {}", self.fetch.timeout),
            });
        }

        if self.fetch.max_redirects > MAX_REDIRECT_LIMIT {
            return Err(MailSiftError::Config {
                message: format!(
                    "max_redirects must be at most {}, got {}",
                    MAX_REDIRECT_LIMIT, self.fetch.max_redirects
                ),
            });
        }

        if self.fetch.user_agent.trim().is_empty() {
            return Err(MailSiftError::Config {
                message: "user_agent must not be empty".to_string(),
            });
        }

        if self.fetch.max_response_bytes == Some(0) {
            return Err(MailSiftError::Config {
                message: "max_response_bytes must be greater than 0 when set".to_string(),
            });
        }

        Ok(())
    }

    /// Call only after `validate` has succeeded.
    pub fn fetch_timeout_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.fetch.timeout)
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS))
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub timeout: Option<f64>,
    pub create_parent_dirs: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Option<f64>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_create_parent_dirs(mut self, create: Option<bool>) -> Self {
        self.create_parent_dirs = create;
        self
    }
}
