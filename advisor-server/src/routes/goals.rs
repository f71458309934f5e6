use std::sync::Arc;

use advisor_core::goal::{Goal, MAX_PROGRESS, NewGoal};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api_error::{ApiError, ApiJson, ApiResult, require};
use crate::app::AppState;
use crate::routes::{UserBody, UserQuery};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalBody {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub persona_id: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

impl From<CreateGoalBody> for NewGoal {
    fn from(body: CreateGoalBody) -> Self {
        NewGoal {
            user_id: body.user_id,
            title: body.title,
            description: body.description,
            persona_id: body.persona_id,
            target_date: body.target_date,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressBody {
    #[serde(default)]
    pub user_id: String,
    pub progress: i64,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<Vec<Goal>>> {
    require(&query.user_id, "userId")?;
    Ok(Json(state.goal_service.list(&query.user_id).await?))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreateGoalBody>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let goal = state.goal_service.create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn update_progress(
    State(state): State<Arc<AppState>>,
    Path(goal_id): Path<String>,
    ApiJson(body): ApiJson<ProgressBody>,
) -> ApiResult<Json<Goal>> {
    require(&body.user_id, "userId")?;
    let progress = u8::try_from(body.progress)
        .ok()
        .filter(|progress| *progress <= MAX_PROGRESS)
        .ok_or_else(|| {
            ApiError::bad_request(format!(
                "progress must be between 0 and {MAX_PROGRESS}, got {}",
                body.progress
            ))
        })?;

    let goal = state
        .goal_service
        .update_progress(&body.user_id, &goal_id, progress)
        .await?;
    Ok(Json(goal))
}

pub async fn complete(
    State(state): State<Arc<AppState>>,
    Path(goal_id): Path<String>,
    ApiJson(body): ApiJson<UserBody>,
) -> ApiResult<Json<Goal>> {
    require(&body.user_id, "userId")?;
    Ok(Json(state.goal_service.complete(&body.user_id, &goal_id).await?))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(goal_id): Path<String>,
    Query(query): Query<UserQuery>,
) -> ApiResult<StatusCode> {
    require(&query.user_id, "userId")?;
    state.goal_service.delete(&query.user_id, &goal_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
