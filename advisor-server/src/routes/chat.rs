//! Stateless chat: the client sends the whole history, nothing is stored.

use std::sync::Arc;

use advisor_application::GENERATION_FAILED_MESSAGE;
use advisor_core::conversation::ChatMessage;
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::api_error::{ApiError, ApiJson, ApiResult};
use crate::app::AppState;

const MISSING_CREDENTIAL_MESSAGE: &str = "API key not configured";

/// An absent or blank id resolves to the fallback persona.
#[derive(Debug, Default, Deserialize)]
pub struct PersonaRef {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default, alias = "expert")]
    pub persona: PersonaRef,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    if request.messages.is_empty() {
        return Err(ApiError::bad_request("Missing messages"));
    }

    match state
        .completion_gateway
        .generate_reply(&request.persona.id, &request.messages)
        .await
    {
        Ok(message) => Ok(Json(ChatResponse { message })),
        Err(err) if err.is_config() => {
            tracing::error!(error = %err, "Completion credential missing");
            Err(ApiError::internal(MISSING_CREDENTIAL_MESSAGE))
        }
        Err(err) => Err(ApiError::from_domain(err, GENERATION_FAILED_MESSAGE)),
    }
}
