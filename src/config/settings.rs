//! Runtime settings and `.env` loading.
//!
//! Settings have built-in defaults that can be overridden from the
//! environment:
//!
//! - `RAZORPAY_API_URL`: Razorpay API base URL
//! - `TRADEFLOW_PARAMETER_PREFIX`: product segment of parameter names
//! - `TRADEFLOW_AWS_REGION`: region of the parameter store

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ConfigError, Result};

/// Default Razorpay API base URL.
const DEFAULT_API_BASE_URL: &str = "https://api.razorpay.com/v1";

/// Default product segment of parameter names.
const DEFAULT_PRODUCT: &str = "tradeflow";

/// Default env file name.
const DEFAULT_ENV_FILE: &str = ".env";

/// Runtime settings for a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Razorpay API base URL, without a trailing slash.
    pub api_base_url: String,
    /// Product segment of parameter names.
    pub product: String,
    /// AWS region of the parameter store; the SDK default chain applies when unset.
    pub region: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            product: DEFAULT_PRODUCT.to_string(),
            region: None,
        }
    }
}

impl Settings {
    /// Loads settings with overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an override has an unusable value.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override has an unusable value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("RAZORPAY_API_URL") {
            debug!("Overriding Razorpay API URL from environment");
            let url = url.trim().trim_end_matches('/');
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidSetting {
                    name: String::from("RAZORPAY_API_URL"),
                    message: format!("'{url}' is not an http(s) URL"),
                }
                .into());
            }
            self.api_base_url = url.to_string();
        }

        if let Some(product) = lookup("TRADEFLOW_PARAMETER_PREFIX") {
            debug!("Overriding parameter prefix from environment");
            let product = product.trim().trim_matches('/');
            if product.is_empty() || product.contains('/') {
                return Err(ConfigError::InvalidSetting {
                    name: String::from("TRADEFLOW_PARAMETER_PREFIX"),
                    message: String::from("must be a single non-empty path segment"),
                }
                .into());
            }
            self.product = product.to_string();
        }

        if let Some(region) = lookup("TRADEFLOW_AWS_REGION").filter(|r| !r.trim().is_empty()) {
            debug!("Overriding AWS region from environment");
            self.region = Some(region.trim().to_string());
        }

        Ok(self)
    }

    /// Sets the AWS region, replacing any value from the environment.
    #[must_use]
    pub fn with_region(mut self, region: Option<String>) -> Self {
        if region.is_some() {
            self.region = region;
        }
        self
    }
}

/// Loads an env file into the process environment if present.
///
/// With no explicit path, `.env` in the current directory is tried and
/// silently skipped when absent. An explicit path must exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be parsed, or if an
/// explicit path does not exist.
pub fn load_dotenv(path: Option<&Path>) -> Result<()> {
    let (env_path, explicit) = path.map_or_else(
        || (PathBuf::from(DEFAULT_ENV_FILE), false),
        |p| (p.to_path_buf(), true),
    );

    if !env_path.exists() {
        if explicit {
            return Err(ConfigError::EnvFile {
                path: env_path,
                message: String::from("file not found"),
            }
            .into());
        }
        debug!(".env file not found at: {}", env_path.display());
        return Ok(());
    }

    info!("Loading environment from: {}", env_path.display());
    dotenvy::from_path(&env_path).map_err(|e| ConfigError::EnvFile {
        path: env_path.clone(),
        message: e.to_string(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "https://api.razorpay.com/v1");
        assert_eq!(settings.product, "tradeflow");
        assert!(settings.region.is_none());
    }

    #[test]
    fn test_overrides_apply() {
        let settings = Settings::default()
            .with_overrides(|name| match name {
                "RAZORPAY_API_URL" => Some("http://127.0.0.1:9000/v1/".to_string()),
                "TRADEFLOW_PARAMETER_PREFIX" => Some("/journal/".to_string()),
                "TRADEFLOW_AWS_REGION" => Some("ap-south-1".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(settings.api_base_url, "http://127.0.0.1:9000/v1");
        assert_eq!(settings.product, "journal");
        assert_eq!(settings.region.as_deref(), Some("ap-south-1"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = Settings::default().with_overrides(|name| {
            (name == "RAZORPAY_API_URL").then(|| "api.razorpay.com".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_region_wins() {
        let settings = Settings {
            region: Some("us-east-1".to_string()),
            ..Settings::default()
        }
        .with_region(Some("eu-west-1".to_string()));
        assert_eq!(settings.region.as_deref(), Some("eu-west-1"));

        let kept = settings.with_region(None);
        assert_eq!(kept.region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn test_load_explicit_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "TRADEFLOW_PLANS_DOTENV_MARKER=loaded").unwrap();

        load_dotenv(Some(file.path())).unwrap();
        assert_eq!(
            std::env::var("TRADEFLOW_PLANS_DOTENV_MARKER").as_deref(),
            Ok("loaded")
        );
    }

    #[test]
    fn test_missing_explicit_env_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = load_dotenv(Some(&dir.path().join("missing.env")));
        assert!(result.is_err());
    }
}
