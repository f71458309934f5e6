//! StripeClient - payments REST API.
//!
//! Only the two calls the checkout flow needs: creating a customer and
//! opening a hosted subscription checkout session.

use advisor_core::billing::{CheckoutRequest, CheckoutSession, PaymentProvider};
use advisor_core::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

const BASE_URL: &str = "https://api.stripe.com/v1";
const SERVICE: &str = "stripe";

/// Metadata key linking a customer back to the local user.
pub const USER_ID_METADATA_KEY: &str = "supabase_user_id";

#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
    base_url: String,
}

impl StripeClient {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            secret_key: secret_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T> {
        if self.secret_key.trim().is_empty() {
            return Err(AdvisorError::config("STRIPE_SECRET_KEY is not configured"));
        }

        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.secret_key)
            .form(form)
            .send()
            .await
            .map_err(|err| {
                AdvisorError::upstream(SERVICE, format!("request to {path} failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Stripe error body".to_string());
            return Err(map_http_error(path, status, body));
        }

        response.json().await.map_err(|err| {
            AdvisorError::upstream(SERVICE, format!("failed to parse {path} response: {err}"))
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    async fn create_customer(&self, email: &str, user_id: &str) -> Result<String> {
        let metadata_key = format!("metadata[{USER_ID_METADATA_KEY}]");
        let customer: CustomerResponse = self
            .post_form(
                "customers",
                &[("email", email), (metadata_key.as_str(), user_id)],
            )
            .await?;
        tracing::info!(user_id, customer_id = %customer.id, "Created billing customer");
        Ok(customer.id)
    }

    async fn create_checkout_session(&self, request: CheckoutRequest) -> Result<CheckoutSession> {
        let session: CheckoutSessionResponse = self
            .post_form(
                "checkout/sessions",
                &[
                    ("mode", "subscription"),
                    ("customer", request.customer_id.as_str()),
                    ("line_items[0][price]", request.price_id.as_str()),
                    ("line_items[0][quantity]", "1"),
                    ("success_url", request.success_url.as_str()),
                    ("cancel_url", request.cancel_url.as_str()),
                ],
            )
            .await?;

        let url = session.url.ok_or_else(|| {
            AdvisorError::upstream(
                SERVICE,
                format!("checkout session {} has no redirect url", session.id),
            )
        })?;
        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }
}

#[derive(Deserialize)]
struct CustomerResponse {
    id: String,
}

#[derive(Deserialize)]
struct CheckoutSessionResponse {
    id: String,
    url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn map_http_error(path: &str, status: StatusCode, body: String) -> AdvisorError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .and_then(|wrapper| wrapper.error.message)
        .unwrap_or(body);
    AdvisorError::upstream(
        SERVICE,
        format!("{path} returned HTTP {}: {message}", status.as_u16()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_message_is_extracted() {
        let err = map_http_error(
            "customers",
            StatusCode::BAD_REQUEST,
            r#"{"error":{"type":"invalid_request_error","message":"No such price"}}"#.to_string(),
        );
        assert!(err.is_upstream());
        assert!(err.to_string().contains("No such price"));
    }

    #[test]
    fn test_unparseable_error_body_is_kept() {
        let err = map_http_error("customers", StatusCode::BAD_GATEWAY, "upstream down".into());
        assert!(err.to_string().contains("upstream down"));
    }

    #[tokio::test]
    async fn test_blank_secret_fails_before_network() {
        let client = StripeClient::new("").with_base_url("http://127.0.0.1:9");
        let err = client.create_customer("a@b.c", "user-1").await.unwrap_err();
        assert!(err.is_config());
    }
}
