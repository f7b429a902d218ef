//! Error types for the plan provisioning tool.
//!
//! This module provides the error hierarchy for every stage of a run:
//! configuration, Razorpay gateway calls, and parameter store persistence.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::Environment;

/// The main error type for plan provisioning.
#[derive(Debug, Error)]
pub enum PlanSyncError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Razorpay gateway errors.
    #[error("Razorpay API error: {0}")]
    Gateway(#[from] GatewayError),

    /// Parameter store errors.
    #[error("Parameter store error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A Razorpay credential is missing or empty for the environment.
    #[error("Missing Razorpay credentials for {environment} environment ({variable} is not set)")]
    MissingCredentials {
        /// Environment the credentials were requested for.
        environment: Environment,
        /// Name of the missing variable.
        variable: String,
    },

    /// The `.env` file exists but could not be loaded.
    #[error("Failed to load env file {path}: {message}")]
    EnvFile {
        /// Path to the env file.
        path: PathBuf,
        /// Description of the load failure.
        message: String,
    },

    /// A setting override has an unusable value.
    #[error("Invalid value for {name}: {message}")]
    InvalidSetting {
        /// Name of the setting.
        name: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// Razorpay gateway errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response.
    #[error("Network error communicating with Razorpay: {message}")]
    Network {
        /// Description of the network error.
        message: String,
    },

    /// The gateway answered with a non-success status.
    #[error("Razorpay API request failed: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Razorpay error code, when the body carried one.
        code: Option<String>,
        /// Razorpay error description, or the raw body when there is none.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// The gateway answered with a body that could not be decoded.
    #[error("Invalid response from Razorpay API: {message}")]
    InvalidResponse {
        /// Description of the response issue.
        message: String,
    },
}

/// Parameter store errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Writing a parameter failed.
    #[error("Failed to store {name}: {message}")]
    Write {
        /// Parameter name.
        name: String,
        /// Description of the failure.
        message: String,
    },

    /// Reading a parameter failed.
    #[error("Failed to read {name}: {message}")]
    Read {
        /// Parameter name.
        name: String,
        /// Description of the failure.
        message: String,
    },
}

/// Result type alias for plan provisioning operations.
pub type Result<T> = std::result::Result<T, PlanSyncError>;

impl PlanSyncError {
    /// Returns the raw gateway response body carried by this error, if any.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Gateway(err) => err.response_body(),
            _ => None,
        }
    }
}

impl GatewayError {
    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Returns the raw response body, if the gateway sent one.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}

impl PersistenceError {
    /// Creates a write error for the given parameter.
    #[must_use]
    pub fn write(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Write {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a read error for the given parameter.
    #[must_use]
    pub fn read(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = GatewayError::Api {
            status: 400,
            code: Some("BAD_REQUEST_ERROR".to_string()),
            message: "The amount must be at least INR 1.00".to_string(),
            body: "{\"error\":{}}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Razorpay API request failed: 400 - The amount must be at least INR 1.00"
        );
        assert_eq!(err.response_body(), Some("{\"error\":{}}"));
    }

    #[test]
    fn test_network_error_has_no_body() {
        let err = GatewayError::network("connection refused");
        assert!(err.response_body().is_none());
    }

    #[test]
    fn test_missing_credentials_converts_to_config() {
        let err = PlanSyncError::from(ConfigError::MissingCredentials {
            environment: Environment::Prod,
            variable: "RAZORPAY_KEY_ID_PROD".to_string(),
        });
        assert!(matches!(err, PlanSyncError::Config(_)));
        assert!(err.response_body().is_none());
        assert!(err.to_string().contains("prod environment"));
    }
}
