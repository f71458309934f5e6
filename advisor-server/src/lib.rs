//! HTTP surface of the expert advisor service.

pub mod api_error;
pub mod app;
pub mod config;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::app::AppState;
use crate::routes::{catalog, chat, checkout, conversations, goals, health, insights, webhook};

/// Every response carries an `x-request-id`, generated when the caller sent none.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/api/personas", get(catalog::list_personas))
        .route("/api/plans", get(catalog::list_plans))
        .route("/api/chat", post(chat::chat))
        .route("/api/checkout", post(checkout::create_checkout))
        .route("/api/billing/webhook", post(webhook::stripe_webhook))
        .route("/api/usage", get(insights::usage))
        .route("/api/analytics", get(insights::analytics))
        .route("/api/conversations/latest", get(conversations::latest))
        .route("/api/conversations/:id", delete(conversations::clear))
        .route(
            "/api/conversations/:id/messages",
            post(conversations::send_message),
        )
        .route("/api/goals", get(goals::list).post(goals::create))
        .route("/api/goals/:id", delete(goals::delete))
        .route("/api/goals/:id/progress", patch(goals::update_progress))
        .route("/api/goals/:id/complete", post(goals::complete))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
