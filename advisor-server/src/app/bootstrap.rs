use std::sync::Arc;

use advisor_infrastructure::{
    SupabaseAnalyticsRepository, SupabaseBillingRepository, SupabaseClient,
    SupabaseConversationRepository, SupabaseGoalRepository, SupabaseUsageRepository,
    SupabaseUserRepository,
};
use advisor_interaction::{ClaudeApiProvider, StripeClient};

use crate::app::{AppDependencies, AppSettings, AppState};
use crate::config::Config;

pub struct AppBootstrap {
    pub app_state: AppState,
}

/// Composition root: builds every client from configuration and wires the
/// application services.
///
/// Repositories share one service-role client. The anon client is only used
/// for the readiness probe.
pub fn bootstrap(config: &Config) -> AppBootstrap {
    let service_client =
        SupabaseClient::service_role(&config.supabase_url, &config.supabase_service_role_key);
    let anon_client = SupabaseClient::anon(&config.supabase_url, &config.supabase_anon_key);

    let completion = ClaudeApiProvider::new(&config.anthropic_api_key)
        .with_model(&config.anthropic_model);
    tracing::info!(
        "[Bootstrap] Completion provider ready (model: {})",
        completion.model()
    );

    let deps = AppDependencies {
        users: Arc::new(SupabaseUserRepository::new(service_client.clone())),
        usage: Arc::new(SupabaseUsageRepository::new(service_client.clone())),
        conversations: Arc::new(SupabaseConversationRepository::new(service_client.clone())),
        analytics: Arc::new(SupabaseAnalyticsRepository::new(service_client.clone())),
        goals: Arc::new(SupabaseGoalRepository::new(service_client.clone())),
        billing: Arc::new(SupabaseBillingRepository::new(service_client)),
        completion: Arc::new(completion),
        payments: Arc::new(StripeClient::new(&config.stripe_secret_key)),
        readiness: Arc::new(anon_client),
    };

    for warning in config.warnings() {
        tracing::warn!("[Bootstrap] {}", warning);
    }
    tracing::info!(
        "[Bootstrap] Price table loaded with {} mapped price ids",
        config.price_tiers.len()
    );

    let settings = AppSettings {
        day_boundary: config.day_boundary,
        price_tiers: config.price_tiers.clone(),
        pro_price_ids: config.pro_price_ids(),
        app_url: config.app_url.clone(),
        webhook_secret: config.stripe_webhook_secret.clone(),
    };

    AppBootstrap {
        app_state: AppState::assemble(deps, settings),
    }
}
