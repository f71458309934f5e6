//! Per-user usage and analytics reads.

use std::sync::Arc;

use advisor_application::UsageSnapshot;
use advisor_core::analytics::UsageAnalytics;
use axum::Json;
use axum::extract::{Query, State};

use crate::api_error::{ApiResult, require};
use crate::app::AppState;
use crate::routes::UserQuery;

pub async fn usage(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<UsageSnapshot>> {
    require(&query.user_id, "userId")?;
    Ok(Json(state.usage_meter.snapshot(&query.user_id).await?))
}

pub async fn analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<UsageAnalytics>> {
    require(&query.user_id, "userId")?;
    Ok(Json(
        state
            .analytics_service
            .summarize_for_user(&query.user_id)
            .await?,
    ))
}
