//! Webhook signature verification and event decoding.
//!
//! The `stripe-signature` header carries `t=<unix seconds>` and one or more
//! `v1=<hex hmac>` entries. The signed payload is `"{t}.{raw body}"`, keyed
//! with the endpoint's shared secret.

use advisor_core::billing::{SubscriptionChange, SubscriptionChangeKind};
use advisor_core::{AdvisorError, Result};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Name of the header carrying the signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Maximum age of a signed timestamp, in seconds.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// A verified webhook event, reduced to what reconciliation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    Subscription(SubscriptionChange),
    /// Any other event type; acknowledged and ignored.
    Other { event_id: String, event_type: String },
}

#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
    tolerance_secs: i64,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    pub fn with_tolerance(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Verifies the signature, then decodes the event.
    ///
    /// Nothing is parsed from the body until the signature checks out.
    pub fn construct_event(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: DateTime<Utc>,
    ) -> Result<WebhookEvent> {
        self.verify(payload, signature_header, now)?;
        parse_event(payload)
    }

    pub fn verify(&self, payload: &[u8], signature_header: &str, now: DateTime<Utc>) -> Result<()> {
        if self.secret.is_empty() {
            return Err(AdvisorError::config("STRIPE_WEBHOOK_SECRET is not configured"));
        }

        let header = SignatureHeader::parse(signature_header)?;
        let skew = now
            .timestamp()
            .checked_sub(header.timestamp)
            .and_then(i64::checked_abs);
        if !matches!(skew, Some(skew) if skew <= self.tolerance_secs) {
            return Err(AdvisorError::signature("timestamp outside the tolerance window"));
        }

        let matched = header.signatures.iter().any(|candidate| {
            let Ok(expected) = hex::decode(candidate) else {
                return false;
            };
            let Ok(mut mac) = HmacSha256::new_from_slice(self.secret.as_bytes()) else {
                return false;
            };
            mac.update(header.timestamp.to_string().as_bytes());
            mac.update(b".");
            mac.update(payload);
            mac.verify_slice(&expected).is_ok()
        });

        if matched {
            Ok(())
        } else {
            Err(AdvisorError::signature("no matching v1 signature"))
        }
    }
}

/// Produces a `stripe-signature` header value for `payload`.
///
/// Used to sign fixtures in tests and local tooling.
pub fn sign_payload(secret: &str, payload: &[u8], timestamp: i64) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|err| AdvisorError::internal(format!("invalid webhook secret: {err}")))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    let signature = hex::encode(mac.finalize().into_bytes());
    Ok(format!("t={timestamp},v1={signature}"))
}

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<String>,
}

impl SignatureHeader {
    fn parse(raw: &str) -> Result<Self> {
        let mut timestamp = None;
        let mut signatures = Vec::new();
        for part in raw.split(',') {
            match part.trim().split_once('=') {
                Some(("t", value)) => timestamp = value.parse::<i64>().ok(),
                Some(("v1", value)) => signatures.push(value.to_string()),
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| AdvisorError::signature("missing or invalid timestamp"))?;
        if signatures.is_empty() {
            return Err(AdvisorError::signature("missing v1 signature"));
        }
        Ok(Self {
            timestamp,
            signatures,
        })
    }
}

#[derive(Deserialize)]
struct EventEnvelope {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    data: EventData,
}

#[derive(Deserialize)]
struct EventData {
    object: serde_json::Value,
}

#[derive(Deserialize)]
struct SubscriptionObject {
    customer: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    items: Option<SubscriptionItems>,
}

#[derive(Deserialize)]
struct SubscriptionItems {
    data: Vec<SubscriptionItem>,
}

#[derive(Deserialize)]
struct SubscriptionItem {
    price: Price,
}

#[derive(Deserialize)]
struct Price {
    id: String,
}

fn parse_event(payload: &[u8]) -> Result<WebhookEvent> {
    let envelope: EventEnvelope = serde_json::from_slice(payload)
        .map_err(|err| AdvisorError::serialization("JSON", format!("invalid webhook event: {err}")))?;

    let kind = match envelope.event_type.as_str() {
        "customer.subscription.created" => SubscriptionChangeKind::Created,
        "customer.subscription.updated" => SubscriptionChangeKind::Updated,
        "customer.subscription.deleted" => SubscriptionChangeKind::Deleted,
        _ => {
            return Ok(WebhookEvent::Other {
                event_id: envelope.id,
                event_type: envelope.event_type,
            });
        }
    };

    let subscription: SubscriptionObject = serde_json::from_value(envelope.data.object)
        .map_err(|err| {
            AdvisorError::serialization("JSON", format!("invalid subscription object: {err}"))
        })?;
    let price_id = subscription
        .items
        .and_then(|items| items.data.into_iter().next())
        .map(|item| item.price.id);

    Ok(WebhookEvent::Subscription(SubscriptionChange {
        event_id: envelope.id,
        kind,
        customer_id: subscription.customer,
        price_id,
        status: subscription.status,
    }))
}
