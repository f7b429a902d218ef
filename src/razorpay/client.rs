//! Razorpay API client implementation.
//!
//! This module provides the HTTP client for the two plan endpoints the
//! provisioning run needs. Requests are sent exactly once: a failed call is
//! surfaced to the caller and never retried.

use reqwest::{Client, RequestBuilder, Response, header};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

use crate::config::{Credentials, PlanSpec};
use crate::error::{GatewayError, Result};

use super::types::{ErrorEnvelope, PlanCollection, RemotePlan};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Page size requested when listing plans; the largest Razorpay accepts.
const LIST_PAGE_SIZE: u32 = 100;

/// Razorpay API client.
#[derive(Debug)]
pub struct RazorpayClient {
    /// HTTP client.
    client: Client,
    /// API base URL, without a trailing slash.
    base_url: String,
    /// Basic auth key pair.
    credentials: Credentials,
}

impl RazorpayClient {
    /// Creates a new Razorpay API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| GatewayError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Returns the URL of the plans collection.
    fn plans_url(&self) -> String {
        format!("{}/plans", self.base_url)
    }

    /// Adds authentication and sends a request.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .basic_auth(self.credentials.key_id(), Some(self.credentials.key_secret()))
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| GatewayError::network(format!("Request failed: {e}")))?;

        Self::decode(response).await
    }

    /// Maps a response to its JSON body or a gateway error.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), body).into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::network(format!("Failed to read response: {e}")))?;
        trace!("Razorpay response: {body}");

        serde_json::from_str(&body).map_err(|e| {
            GatewayError::InvalidResponse {
                message: format!("Failed to parse response: {e}"),
            }
            .into()
        })
    }

    /// Lists existing plans.
    ///
    /// Issues a single request for the largest page Razorpay serves.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_plans(&self) -> Result<Vec<RemotePlan>> {
        debug!("Listing Razorpay plans");

        let request = self
            .client
            .get(self.plans_url())
            .query(&[("count", LIST_PAGE_SIZE)]);
        let collection: PlanCollection = self.send(request).await?;

        Ok(collection.items)
    }

    /// Creates a plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be created.
    pub async fn create_plan(&self, plan: &PlanSpec) -> Result<RemotePlan> {
        debug!("Creating Razorpay plan: {}", plan.name());

        let request = self.client.post(self.plans_url()).json(plan);
        self.send(request).await
    }
}

/// Builds an API error, pulling Razorpay's error code and description out of
/// the body when it has the usual envelope.
fn api_error(status: u16, body: String) -> GatewayError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(&body).ok();
    let code = envelope.as_ref().and_then(|e| e.error.code.clone());
    let message = envelope
        .and_then(|e| e.error.description)
        .unwrap_or_else(|| body.clone());

    GatewayError::Api {
        status,
        code,
        message,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PLAN_CATALOG;
    use crate::error::PlanSyncError;
    use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RazorpayClient {
        RazorpayClient::new(
            &format!("{}/v1/", server.uri()),
            Credentials::new("rzp_test_key", "rzp_test_secret"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_plans_uses_basic_auth() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/plans"))
            .and(query_param("count", "100"))
            .and(basic_auth("rzp_test_key", "rzp_test_secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "entity": "collection",
                "count": 1,
                "items": [{
                    "id": "plan_basic_monthly",
                    "period": "monthly",
                    "interval": 1,
                    "item": { "name": "TradeFlow Basic - Monthly", "amount": 29900, "currency": "USD" }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let plans = client_for(&server).list_plans().await.unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].id, "plan_basic_monthly");
    }

    #[tokio::test]
    async fn test_create_plan_posts_catalog_entry() {
        let server = MockServer::start().await;
        let spec = PLAN_CATALOG[2];

        Mock::given(method("POST"))
            .and(path("/v1/plans"))
            .and(body_json(serde_json::to_value(spec).unwrap()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "plan_pro_monthly",
                "period": "monthly",
                "interval": 1,
                "item": { "name": spec.item.name, "amount": spec.item.amount, "currency": "USD" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let plan = client_for(&server).create_plan(&spec).await.unwrap();
        assert_eq!(plan.id, "plan_pro_monthly");
        assert_eq!(plan.name(), "TradeFlow Pro - Monthly");
    }

    #[tokio::test]
    async fn test_error_envelope_is_parsed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/plans"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {
                    "code": "BAD_REQUEST_ERROR",
                    "description": "Currency is not supported"
                }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_plan(&PLAN_CATALOG[0])
            .await
            .unwrap_err();

        match err {
            PlanSyncError::Gateway(GatewayError::Api { status, code, message, body }) => {
                assert_eq!(status, 400);
                assert_eq!(code.as_deref(), Some("BAD_REQUEST_ERROR"));
                assert_eq!(message, "Currency is not supported");
                assert!(body.contains("BAD_REQUEST_ERROR"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_plain_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/plans"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_plans().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Razorpay API error: Razorpay API request failed: 401 - Unauthorized"
        );
    }

    #[tokio::test]
    async fn test_invalid_json_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/plans"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_plans().await.unwrap_err();
        assert!(matches!(
            err,
            PlanSyncError::Gateway(GatewayError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_api_error_without_envelope() {
        let err = api_error(503, String::from("upstream unavailable"));
        match err {
            GatewayError::Api { code, message, .. } => {
                assert!(code.is_none());
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
