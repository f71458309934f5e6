use std::sync::Arc;

use advisor_application::ChatOutcome;
use advisor_core::conversation::Conversation;
use advisor_core::persona::find_persona;
use advisor_core::usage::QuotaStatus;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::api_error::{ApiError, ApiJson, ApiResult, require};
use crate::app::AppState;
use crate::routes::UserQuery;

const LIMIT_REACHED_MESSAGE: &str = "Daily message limit reached";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageBody {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub conversation_id: String,
    pub reply: String,
    pub reply_failed: bool,
    pub quota: QuotaStatus,
}

#[derive(Debug, Serialize)]
pub struct LimitReachedBody {
    pub error: String,
    pub quota: QuotaStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestQuery {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub persona_id: String,
}

/// One chat turn against the stored conversation for this persona.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(persona_id): Path<String>,
    ApiJson(body): ApiJson<SendMessageBody>,
) -> ApiResult<Response> {
    require(&body.user_id, "userId")?;
    if find_persona(&persona_id).is_none() {
        return Err(ApiError::bad_request(format!("Unknown persona '{persona_id}'")));
    }

    let outcome = state
        .chat_usecase
        .send_message(&body.user_id, &persona_id, &body.content)
        .await?;

    let response = match outcome {
        ChatOutcome::Blocked(quota) => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(LimitReachedBody {
                error: quota
                    .message
                    .clone()
                    .unwrap_or_else(|| LIMIT_REACHED_MESSAGE.to_string()),
                quota,
            }),
        )
            .into_response(),
        ChatOutcome::Replied(turn) => Json(SendMessageResponse {
            conversation_id: turn.conversation.id,
            reply: turn.reply,
            reply_failed: turn.reply_failed,
            quota: turn.quota,
        })
        .into_response(),
    };
    Ok(response)
}

pub async fn latest(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LatestQuery>,
) -> ApiResult<Json<Conversation>> {
    require(&query.user_id, "userId")?;
    require(&query.persona_id, "personaId")?;
    let conversation = state
        .conversation_service
        .load_latest(&query.user_id, &query.persona_id)
        .await?;
    Ok(Json(conversation))
}

/// Clears history by deleting the conversation row.
pub async fn clear(
    State(state): State<Arc<AppState>>,
    Path(conversation_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> ApiResult<StatusCode> {
    require(&query.user_id, "userId")?;
    state
        .conversation_service
        .delete(&query.user_id, &conversation_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
