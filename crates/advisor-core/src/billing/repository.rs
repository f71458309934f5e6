//! Billing record repository trait.

use super::model::BillingRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Persistence for the user to billing-customer mapping.
#[async_trait]
pub trait BillingRepository: Send + Sync {
    /// Finds the billing record for a user.
    async fn find_by_user(&self, user_id: &str) -> Result<Option<BillingRecord>>;

    /// Finds the billing record for a payment-provider customer.
    async fn find_by_customer(&self, customer_id: &str) -> Result<Option<BillingRecord>>;

    /// Stores the customer id for a user and returns the stored record.
    ///
    /// Implementations keep one record per user: if a record already exists
    /// it is returned unchanged.
    async fn create(&self, user_id: &str, customer_id: &str) -> Result<BillingRecord>;

    /// Records the latest subscription plan and status for a customer.
    async fn record_subscription(
        &self,
        customer_id: &str,
        plan_id: Option<&str>,
        status: Option<&str>,
    ) -> Result<()>;
}
