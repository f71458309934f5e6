pub mod analytics_service;
pub mod billing_service;
pub mod chat_usecase;
pub mod completion_gateway;
pub mod conversation_service;
pub mod goal_service;
pub mod usage_meter;

pub use analytics_service::AnalyticsService;
pub use billing_service::{BillingService, ReconcileOutcome};
pub use chat_usecase::{ChatOutcome, ChatTurn, ChatUseCase, FAILED_REPLY_APOLOGY};
pub use completion_gateway::{
    CompletionGateway, GENERATION_FAILED_MESSAGE, MAX_REPLY_TOKENS, NON_TEXT_APOLOGY,
};
pub use conversation_service::{ConversationService, ConversationSession};
pub use goal_service::GoalService;
pub use usage_meter::{UsageMeter, UsageSnapshot};
