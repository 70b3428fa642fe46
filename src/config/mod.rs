#[cfg(feature = "cli")]
pub mod cli;

use crate::core::QuotaPolicy;
use crate::utils::error::{DinnerError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Deployment environment; selects the log format and default verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Dev,
    Prod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub env: Environment,
    pub storage: StorageConfig,
    #[serde(default)]
    pub quota: QuotaConfig,
    #[serde(default)]
    pub reply: ReplyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub catalog_path: String,
    pub history_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,
    #[serde(default = "default_window_hours")]
    pub window_hours: i64,
}

fn default_max_requests() -> usize {
    10
}

fn default_window_hours() -> i64 {
    24
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_hours: default_window_hours(),
        }
    }
}

impl QuotaConfig {
    pub fn policy(&self) -> QuotaPolicy {
        QuotaPolicy::new(self.max_requests, chrono::Duration::hours(self.window_hours))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyConfig {
    #[serde(default = "default_conjunction")]
    pub conjunction: String,
}

fn default_conjunction() -> String {
    " and ".to_string()
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            conjunction: default_conjunction(),
        }
    }
}

impl AppConfig {
    /// Reads and parses the config file. A missing file is a config error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DinnerError::ConfigError {
                message: format!("config file does not exist: {}", path.display()),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DinnerError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| DinnerError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_data_file("storage.catalog_path", &self.storage.catalog_path, "csv")?;
        validation::validate_data_file("storage.history_path", &self.storage.history_path, "json")?;
        validation::validate_range("quota.max_requests", self.quota.max_requests, 1, 1000)?;
        validation::validate_range("quota.window_hours", self.quota.window_hours, 1, 24 * 30)?;
        validation::validate_conjunction("reply.conjunction", &self.reply.conjunction)?;
        Ok(())
    }
}
