//! Subscription checkout and webhook reconciliation.
//!
//! The two flows are independent and share only the user-to-customer
//! mapping: checkout creates it lazily, reconciliation reads it to find the
//! user a subscription event belongs to.

use advisor_core::billing::{
    BillingRepository, CheckoutRequest, PaymentProvider, PriceTierTable, SubscriptionChange,
    SubscriptionChangeKind,
};
use advisor_core::plan::Tier;
use advisor_core::user::UserRepository;
use advisor_core::{AdvisorError, Result};
use std::sync::Arc;

/// What reconciliation did with a subscription event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The user's tier was written.
    Applied { user_id: String, tier: Tier },
    /// No local user is mapped to the event's customer.
    UnknownCustomer,
}

pub struct BillingService {
    users: Arc<dyn UserRepository>,
    billing: Arc<dyn BillingRepository>,
    payments: Arc<dyn PaymentProvider>,
    price_tiers: PriceTierTable,
    app_url: String,
}

impl BillingService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        billing: Arc<dyn BillingRepository>,
        payments: Arc<dyn PaymentProvider>,
        price_tiers: PriceTierTable,
        app_url: impl Into<String>,
    ) -> Self {
        Self {
            users,
            billing,
            payments,
            price_tiers,
            app_url: app_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn price_tiers(&self) -> &PriceTierTable {
        &self.price_tiers
    }

    /// Opens a hosted subscription checkout and returns its redirect URL.
    ///
    /// # Returns
    ///
    /// * `Err(AdvisorError::Validation)` - `user_id` or `price_id` is blank
    /// * `Err(AdvisorError::NotFound)` - No profile, or the profile has no email
    /// * `Err(AdvisorError::DataAccess)` - The new customer could not be stored
    pub async fn start_checkout(&self, user_id: &str, price_id: &str) -> Result<String> {
        if user_id.trim().is_empty() || price_id.trim().is_empty() {
            return Err(AdvisorError::validation("Missing userId or priceId"));
        }

        let profile = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AdvisorError::not_found("UserProfile", user_id))?;
        let email = profile
            .billing_email()
            .ok_or_else(|| AdvisorError::not_found("UserProfile email", user_id))?;

        let customer_id = match self.billing.find_by_user(user_id).await? {
            Some(record) => record.billing_customer_id,
            None => {
                let created = self.payments.create_customer(email, user_id).await?;
                let record = self.billing.create(user_id, &created).await.map_err(|err| {
                    tracing::error!(user_id, error = %err, "Failed to store billing customer");
                    AdvisorError::data_access("Failed to save subscription")
                })?;
                record.billing_customer_id
            }
        };

        let session = self
            .payments
            .create_checkout_session(CheckoutRequest {
                customer_id,
                price_id: price_id.to_string(),
                success_url: format!(
                    "{}/dashboard?session_id={{CHECKOUT_SESSION_ID}}",
                    self.app_url
                ),
                cancel_url: format!("{}/pricing", self.app_url),
            })
            .await?;
        tracing::info!(user_id, price_id, session_id = %session.id, "Opened checkout session");
        Ok(session.url)
    }

    /// Applies a verified subscription event to the mapped user's tier.
    ///
    /// Deleted subscriptions and unmapped prices resolve to the free tier.
    /// Applying the same event twice leaves the same state.
    pub async fn reconcile(&self, change: &SubscriptionChange) -> Result<ReconcileOutcome> {
        let Some(record) = self.billing.find_by_customer(&change.customer_id).await? else {
            tracing::warn!(
                event_id = %change.event_id,
                customer_id = %change.customer_id,
                "Subscription event for unknown customer"
            );
            return Ok(ReconcileOutcome::UnknownCustomer);
        };

        let tier = match change.kind {
            SubscriptionChangeKind::Deleted => Tier::Free,
            SubscriptionChangeKind::Created | SubscriptionChangeKind::Updated => {
                self.price_tiers.tier_for(change.price_id.as_deref())
            }
        };

        self.billing
            .record_subscription(
                &change.customer_id,
                change.price_id.as_deref(),
                change.status.as_deref(),
            )
            .await?;
        self.users.set_tier(&record.user_id, tier).await?;

        tracing::info!(
            event_id = %change.event_id,
            user_id = %record.user_id,
            tier = %tier,
            "Applied subscription change"
        );
        Ok(ReconcileOutcome::Applied {
            user_id: record.user_id,
            tier,
        })
    }
}
