//! Analytics event sink backed by the `usage_analytics` table.

use crate::supabase_client::SupabaseClient;
use advisor_core::Result;
use advisor_core::analytics::{AnalyticsEvent, AnalyticsRepository};
use async_trait::async_trait;

pub struct SupabaseAnalyticsRepository {
    client: SupabaseClient,
}

impl SupabaseAnalyticsRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnalyticsRepository for SupabaseAnalyticsRepository {
    async fn record(&self, event: AnalyticsEvent) -> Result<()> {
        self.client
            .from("usage_analytics")
            .insert(&event)
            .await
            .map(|_| ())
    }
}
