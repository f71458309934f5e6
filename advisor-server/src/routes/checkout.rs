use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::api_error::{ApiError, ApiJson, ApiResult};
use crate::app::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutBody {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub price_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub checkout_url: String,
}

pub async fn create_checkout(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CheckoutBody>,
) -> ApiResult<Json<CheckoutResponse>> {
    let checkout_url = state
        .billing_service
        .start_checkout(&body.user_id, &body.price_id)
        .await
        .map_err(|err| ApiError::from_domain(err, "Failed to create checkout session"))?;
    Ok(Json(CheckoutResponse { checkout_url }))
}
