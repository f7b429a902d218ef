//! Parameter store trait definition.
//!
//! This module defines the common interface for the key-value services plan
//! identifiers are handed off through.

use async_trait::async_trait;

use crate::error::Result;

/// Trait for parameter storage backends.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Writes a string parameter, overwriting any existing value.
    async fn put(&self, name: &str, value: &str, description: &str) -> Result<()>;

    /// Reads a parameter.
    ///
    /// Returns `None` if the parameter does not exist.
    async fn get(&self, name: &str) -> Result<Option<String>>;

    /// Gets the backend type name.
    fn backend_type(&self) -> &'static str;
}
