use std::sync::Arc;

use advisor_application::{
    AnalyticsService, BillingService, ChatUseCase, CompletionGateway, ConversationService,
    GoalService, UsageMeter,
};
use advisor_core::Result;
use advisor_core::analytics::AnalyticsRepository;
use advisor_core::billing::{BillingRepository, PaymentProvider, PriceTierTable};
use advisor_core::completion::CompletionProvider;
use advisor_core::conversation::ConversationRepository;
use advisor_core::goal::GoalRepository;
use advisor_core::usage::{DayBoundary, UsageRepository};
use advisor_core::user::UserRepository;
use advisor_infrastructure::SupabaseClient;
use advisor_interaction::WebhookVerifier;
use async_trait::async_trait;

/// Probe used by `/readyz`.
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    async fn check(&self) -> Result<()>;
}

#[async_trait]
impl ReadinessCheck for SupabaseClient {
    async fn check(&self) -> Result<()> {
        self.ping().await
    }
}

/// Ports the application layer is wired against.
pub struct AppDependencies {
    pub users: Arc<dyn UserRepository>,
    pub usage: Arc<dyn UsageRepository>,
    pub conversations: Arc<dyn ConversationRepository>,
    pub analytics: Arc<dyn AnalyticsRepository>,
    pub goals: Arc<dyn GoalRepository>,
    pub billing: Arc<dyn BillingRepository>,
    pub completion: Arc<dyn CompletionProvider>,
    pub payments: Arc<dyn PaymentProvider>,
    pub readiness: Arc<dyn ReadinessCheck>,
}

/// Deployment settings that shape behavior rather than wiring.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub day_boundary: DayBoundary,
    pub price_tiers: PriceTierTable,
    pub pro_price_ids: Vec<String>,
    pub app_url: String,
    pub webhook_secret: String,
}

/// Application state shared across request handlers.
pub struct AppState {
    pub chat_usecase: Arc<ChatUseCase>,
    pub conversation_service: Arc<ConversationService>,
    pub completion_gateway: Arc<CompletionGateway>,
    pub usage_meter: Arc<UsageMeter>,
    pub analytics_service: Arc<AnalyticsService>,
    pub goal_service: Arc<GoalService>,
    pub billing_service: Arc<BillingService>,
    pub webhook_verifier: WebhookVerifier,
    pub pro_price_ids: Vec<String>,
    pub readiness: Arc<dyn ReadinessCheck>,
}

impl AppState {
    pub fn assemble(deps: AppDependencies, settings: AppSettings) -> Self {
        let usage_meter = Arc::new(UsageMeter::new(
            deps.users.clone(),
            deps.usage,
            settings.day_boundary,
        ));
        let conversation_service = Arc::new(ConversationService::new(
            deps.conversations.clone(),
            deps.analytics,
        ));
        let completion_gateway = Arc::new(CompletionGateway::new(deps.completion));
        let chat_usecase = Arc::new(ChatUseCase::new(
            usage_meter.clone(),
            conversation_service.clone(),
            completion_gateway.clone(),
        ));
        let analytics_service = Arc::new(AnalyticsService::new(
            deps.conversations,
            settings.day_boundary,
        ));
        let goal_service = Arc::new(GoalService::new(deps.goals));
        let billing_service = Arc::new(BillingService::new(
            deps.users,
            deps.billing,
            deps.payments,
            settings.price_tiers,
            settings.app_url,
        ));

        Self {
            chat_usecase,
            conversation_service,
            completion_gateway,
            usage_meter,
            analytics_service,
            goal_service,
            billing_service,
            webhook_verifier: WebhookVerifier::new(settings.webhook_secret),
            pro_price_ids: settings.pro_price_ids,
            readiness: deps.readiness,
        }
    }
}
