use std::sync::Arc;

use advisor_core::persona::{Persona, all_personas};
use advisor_core::plan::{Plan, all_plans};
use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::app::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlansResponse {
    pub plans: &'static [Plan],
    pub pro_price_ids: Vec<String>,
}

/// Public persona metadata. System prompts are not serialized.
pub async fn list_personas() -> Json<&'static [Persona]> {
    Json(all_personas())
}

pub async fn list_plans(State(state): State<Arc<AppState>>) -> Json<PlansResponse> {
    Json(PlansResponse {
        plans: all_plans(),
        pro_price_ids: state.pro_price_ids.clone(),
    })
}
