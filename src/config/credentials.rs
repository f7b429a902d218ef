//! Razorpay credential resolution.
//!
//! Each environment has its own key pair, read from
//! `RAZORPAY_KEY_ID_<ENV>` and `RAZORPAY_KEY_SECRET_<ENV>`.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ConfigError, Result};

use super::environment::Environment;

/// Prefix of the key id variables.
const KEY_ID_VAR_PREFIX: &str = "RAZORPAY_KEY_ID";

/// Prefix of the key secret variables.
const KEY_SECRET_VAR_PREFIX: &str = "RAZORPAY_KEY_SECRET";

/// A Razorpay key pair for HTTP basic authentication.
#[derive(Debug)]
pub struct Credentials {
    /// Public key id.
    key_id: String,
    /// Private key secret.
    key_secret: SecretString,
}

impl Credentials {
    /// Creates credentials from an explicit key pair.
    #[must_use]
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        let key_secret: String = key_secret.into();
        Self {
            key_id: key_id.into(),
            key_secret: SecretString::from(key_secret),
        }
    }

    /// Resolves the credential pair for an environment through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is unset or blank.
    pub fn resolve<F>(environment: Environment, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key_id = Self::required(environment, KEY_ID_VAR_PREFIX, &lookup)?;
        let key_secret = Self::required(environment, KEY_SECRET_VAR_PREFIX, &lookup)?;

        Ok(Self::new(key_id, key_secret))
    }

    /// Looks up one half of the pair, rejecting blank values.
    fn required<F>(environment: Environment, prefix: &str, lookup: &F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let variable = format!("{prefix}_{}", environment.credential_suffix());

        lookup(&variable)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                ConfigError::MissingCredentials {
                    environment,
                    variable,
                }
                .into()
            })
    }

    /// Returns the key id.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Returns the key secret.
    #[must_use]
    pub fn key_secret(&self) -> &str {
        self.key_secret.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanSyncError;
    use std::collections::HashMap;

    fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_resolve_dev_pair() {
        let lookup = lookup_from(&[
            ("RAZORPAY_KEY_ID_DEV", "rzp_test_abc"),
            ("RAZORPAY_KEY_SECRET_DEV", "s3cret"),
            ("RAZORPAY_KEY_ID_PROD", "rzp_live_xyz"),
        ]);

        let creds = Credentials::resolve(Environment::Dev, lookup).unwrap();
        assert_eq!(creds.key_id(), "rzp_test_abc");
        assert_eq!(creds.key_secret(), "s3cret");
    }

    #[test]
    fn test_missing_secret_is_config_error() {
        let lookup = lookup_from(&[("RAZORPAY_KEY_ID_PROD", "rzp_live_xyz")]);

        let err = Credentials::resolve(Environment::Prod, lookup).unwrap_err();
        match err {
            PlanSyncError::Config(ConfigError::MissingCredentials { environment, variable }) => {
                assert_eq!(environment, Environment::Prod);
                assert_eq!(variable, "RAZORPAY_KEY_SECRET_PROD");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_key_id_is_rejected() {
        let lookup = lookup_from(&[
            ("RAZORPAY_KEY_ID_DEV", "   "),
            ("RAZORPAY_KEY_SECRET_DEV", "s3cret"),
        ]);

        assert!(Credentials::resolve(Environment::Dev, lookup).is_err());
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let creds = Credentials::new("rzp_test_abc", "s3cret");
        assert!(!format!("{creds:?}").contains("s3cret"));
    }
}
