//! Analytics event sink trait.

use super::event::AnalyticsEvent;
use crate::error::Result;
use async_trait::async_trait;

/// Append-only sink for analytics events.
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Records one event.
    async fn record(&self, event: AnalyticsEvent) -> Result<()>;
}
