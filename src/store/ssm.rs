//! AWS Systems Manager Parameter Store backend.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ssm::Client;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::types::ParameterType;
use tracing::{debug, info};

use crate::error::{PersistenceError, Result};

use super::parameter::ParameterStore;

/// SSM-backed parameter store.
#[derive(Debug, Clone)]
pub struct SsmParameterStore {
    /// SSM client.
    client: Client,
}

impl SsmParameterStore {
    /// Creates a store from the default AWS configuration chain.
    ///
    /// An explicit region takes precedence over the one the chain resolves.
    pub async fn new(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region_str) = region {
            info!("Using AWS region: {region_str}");
            loader = loader.region(Region::new(region_str.to_string()));
        }

        let config = loader.load().await;
        Self::with_client(Client::new(&config))
    }

    /// Creates a store with an existing client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn put(&self, name: &str, value: &str, description: &str) -> Result<()> {
        debug!("Putting SSM parameter {name}");

        self.client
            .put_parameter()
            .name(name)
            .value(value)
            .r#type(ParameterType::String)
            .overwrite(true)
            .description(description)
            .send()
            .await
            .map_err(|e| PersistenceError::write(name, DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<String>> {
        debug!("Getting SSM parameter {name}");

        match self.client.get_parameter().name(name).send().await {
            Ok(output) => Ok(output
                .parameter()
                .and_then(|p| p.value())
                .map(ToString::to_string)),
            Err(sdk_err) => {
                let service_err = sdk_err.into_service_error();
                if service_err.is_parameter_not_found() {
                    Ok(None)
                } else {
                    Err(PersistenceError::read(
                        name,
                        DisplayErrorContext(&service_err).to_string(),
                    )
                    .into())
                }
            }
        }
    }

    fn backend_type(&self) -> &'static str {
        "ssm"
    }
}
