pub mod dto;
pub mod memory_store;
pub mod supabase_analytics_repository;
pub mod supabase_billing_repository;
pub mod supabase_client;
pub mod supabase_conversation_repository;
pub mod supabase_goal_repository;
pub mod supabase_usage_repository;
pub mod supabase_user_repository;

pub use crate::memory_store::InMemoryStore;
pub use crate::supabase_analytics_repository::SupabaseAnalyticsRepository;
pub use crate::supabase_billing_repository::SupabaseBillingRepository;
pub use crate::supabase_client::{AccessRole, SupabaseClient};
pub use crate::supabase_conversation_repository::SupabaseConversationRepository;
pub use crate::supabase_goal_repository::SupabaseGoalRepository;
pub use crate::supabase_usage_repository::SupabaseUsageRepository;
pub use crate::supabase_user_repository::SupabaseUserRepository;
