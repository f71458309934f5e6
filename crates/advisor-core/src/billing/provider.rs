//! Payment provider port.

use super::model::{CheckoutRequest, CheckoutSession};
use crate::error::Result;
use async_trait::async_trait;

/// Operations the service needs from the hosted payments provider.
///
/// Implementations map transport and provider failures to
/// `AdvisorError::Upstream`.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Creates a billing customer and returns its provider id.
    async fn create_customer(&self, email: &str, user_id: &str) -> Result<String>;

    /// Opens a subscription checkout session for one price.
    async fn create_checkout_session(&self, request: CheckoutRequest) -> Result<CheckoutSession>;
}
