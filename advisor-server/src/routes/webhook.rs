//! Payment provider webhook.
//!
//! The raw body is verified against the signature header before anything is
//! parsed. Replays and unknown customers are acknowledged with 200 so the
//! provider stops retrying.

use std::sync::Arc;

use advisor_application::ReconcileOutcome;
use advisor_interaction::{SIGNATURE_HEADER, WebhookEvent};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use chrono::Utc;
use serde::Serialize;

use crate::api_error::{ApiError, ApiResult};
use crate::app::AppState;

const WEBHOOK_ERROR: &str = "Webhook Error";

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

pub async fn stripe_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<WebhookAck>> {
    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
    else {
        tracing::warn!("Webhook request without signature header");
        return Err(ApiError::bad_request(WEBHOOK_ERROR));
    };

    let event = state
        .webhook_verifier
        .construct_event(&body, signature, Utc::now())
        .map_err(|err| {
            if err.is_config() {
                tracing::error!(error = %err, "Webhook secret missing");
                return ApiError::internal("Internal Server Error");
            }
            tracing::warn!(error = %err, "Webhook rejected");
            ApiError::bad_request(WEBHOOK_ERROR)
        })?;

    match event {
        WebhookEvent::Subscription(change) => {
            let outcome = state.billing_service.reconcile(&change).await.map_err(|err| {
                tracing::error!(event_id = %change.event_id, error = %err, "Webhook reconciliation failed");
                ApiError::internal("Internal Server Error")
            })?;
            if let ReconcileOutcome::UnknownCustomer = outcome {
                tracing::debug!(event_id = %change.event_id, "Acknowledged event for unknown customer");
            }
        }
        WebhookEvent::Other {
            event_id,
            event_type,
        } => {
            tracing::info!(%event_id, %event_type, "Unhandled webhook event type");
        }
    }

    Ok(Json(WebhookAck { received: true }))
}
