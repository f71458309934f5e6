//! Billing domain module.
//!
//! # Module Structure
//!
//! - `model`: Billing records, checkout and subscription-change types
//! - `price_table`: Price id to tier mapping
//! - `repository`: Billing-customer mapping persistence
//! - `provider`: Payment provider port

mod model;
mod price_table;
mod provider;
mod repository;

pub use model::{
    BillingRecord, CheckoutRequest, CheckoutSession, SubscriptionChange, SubscriptionChangeKind,
};
pub use price_table::{PriceTierTable, parse_overrides};
pub use provider::PaymentProvider;
pub use repository::BillingRepository;
