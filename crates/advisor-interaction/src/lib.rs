pub mod claude_api_provider;
pub mod stripe_client;
pub mod stripe_webhook;

pub use claude_api_provider::{ClaudeApiProvider, DEFAULT_CLAUDE_MODEL};
pub use stripe_client::StripeClient;
pub use stripe_webhook::{SIGNATURE_HEADER, WebhookEvent, WebhookVerifier, sign_payload};
