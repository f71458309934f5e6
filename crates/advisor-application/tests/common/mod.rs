//! Shared fakes and wiring for the end-to-end scenarios.

#![allow(dead_code)]

use advisor_application::{
    AnalyticsService, BillingService, ChatUseCase, CompletionGateway, ConversationService,
    GoalService, UsageMeter,
};
use advisor_core::billing::{CheckoutRequest, CheckoutSession, PaymentProvider, PriceTierTable};
use advisor_core::completion::{CompletionOutput, CompletionProvider, CompletionRequest};
use advisor_core::plan::Tier;
use advisor_core::usage::DayBoundary;
use advisor_core::{AdvisorError, Result};
use advisor_infrastructure::InMemoryStore;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub const PRO_PRICE: &str = "price_pro_monthly";
pub const APP_URL: &str = "https://advisor.example.com";

/// Echoes the last user message, or fails when switched off.
#[derive(Default)]
pub struct EchoProvider {
    pub failing: AtomicBool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl CompletionProvider for EchoProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AdvisorError::upstream("anthropic", "HTTP 500: boom"));
        }
        let last = request
            .messages
            .last()
            .map(|message| message.content.clone())
            .unwrap_or_default();
        Ok(CompletionOutput::Text(format!("echo: {last}")))
    }
}

/// Records payment calls and hands out predictable ids.
#[derive(Default)]
pub struct FakePayments {
    pub customers: Mutex<Vec<(String, String)>>,
    pub sessions: Mutex<Vec<CheckoutRequest>>,
}

#[async_trait]
impl PaymentProvider for FakePayments {
    async fn create_customer(&self, email: &str, user_id: &str) -> Result<String> {
        let mut customers = self.customers.lock().unwrap();
        customers.push((email.to_string(), user_id.to_string()));
        Ok(format!("cus_{}", customers.len()))
    }

    async fn create_checkout_session(&self, request: CheckoutRequest) -> Result<CheckoutSession> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.push(request);
        let id = format!("cs_{}", sessions.len());
        Ok(CheckoutSession {
            url: format!("https://checkout.example.com/{id}"),
            id,
        })
    }
}

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub provider: Arc<EchoProvider>,
    pub payments: Arc<FakePayments>,
    pub usage_meter: Arc<UsageMeter>,
    pub conversations: Arc<ConversationService>,
    pub chat: ChatUseCase,
    pub analytics: AnalyticsService,
    pub goals: GoalService,
    pub billing: BillingService,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let provider = Arc::new(EchoProvider::default());
        let payments = Arc::new(FakePayments::default());
        let day_boundary = DayBoundary::utc();

        let usage_meter = Arc::new(UsageMeter::new(store.clone(), store.clone(), day_boundary));
        let conversations = Arc::new(ConversationService::new(store.clone(), store.clone()));
        let gateway = Arc::new(CompletionGateway::new(provider.clone()));
        let chat = ChatUseCase::new(usage_meter.clone(), conversations.clone(), gateway);
        let analytics = AnalyticsService::new(store.clone(), day_boundary);
        let goals = GoalService::new(store.clone());
        let billing = BillingService::new(
            store.clone(),
            store.clone(),
            payments.clone(),
            PriceTierTable::new().with_price(PRO_PRICE, Tier::Pro),
            APP_URL,
        );

        Self {
            store,
            provider,
            payments,
            usage_meter,
            conversations,
            chat,
            analytics,
            goals,
            billing,
        }
    }
}
