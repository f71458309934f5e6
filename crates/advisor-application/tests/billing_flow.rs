mod common;

use advisor_application::{ChatOutcome, ReconcileOutcome};
use advisor_core::billing::{SubscriptionChange, SubscriptionChangeKind};
use advisor_core::plan::{FREE_DAILY_LIMIT, Tier};
use advisor_core::user::UserRepository;
use advisor_interaction::{WebhookEvent, WebhookVerifier, sign_payload};
use chrono::Utc;
use common::{APP_URL, Harness, PRO_PRICE};

const WEBHOOK_SECRET: &str = "whsec_integration";

fn change(kind: SubscriptionChangeKind, customer_id: &str, price: Option<&str>) -> SubscriptionChange {
    SubscriptionChange {
        event_id: "evt_1".to_string(),
        kind,
        customer_id: customer_id.to_string(),
        price_id: price.map(str::to_string),
        status: Some("active".to_string()),
    }
}

async fn tier_of(harness: &Harness, user_id: &str) -> Tier {
    harness
        .store
        .find_by_id(user_id)
        .await
        .unwrap()
        .unwrap()
        .subscription_tier
}

#[tokio::test]
async fn checkout_creates_customer_once() {
    let harness = Harness::new();
    harness.store.add_user("user-1", Some("ada@example.com")).await;

    let url = harness.billing.start_checkout("user-1", PRO_PRICE).await.unwrap();
    assert_eq!(url, "https://checkout.example.com/cs_1");
    harness.billing.start_checkout("user-1", PRO_PRICE).await.unwrap();

    let customers = harness.payments.customers.lock().unwrap().clone();
    assert_eq!(
        customers,
        vec![("ada@example.com".to_string(), "user-1".to_string())]
    );

    let sessions = harness.payments.sessions.lock().unwrap().clone();
    assert_eq!(sessions.len(), 2);
    assert!(sessions.iter().all(|s| s.customer_id == "cus_1"));
    assert_eq!(
        sessions[0].success_url,
        format!("{APP_URL}/dashboard?session_id={{CHECKOUT_SESSION_ID}}")
    );
    assert_eq!(sessions[0].cancel_url, format!("{APP_URL}/pricing"));
}

#[tokio::test]
async fn checkout_validates_input_and_user() {
    let harness = Harness::new();
    harness.store.add_user("no-email", None).await;

    assert!(harness.billing.start_checkout("", PRO_PRICE).await.unwrap_err().is_validation());
    assert!(harness.billing.start_checkout("user-1", " ").await.unwrap_err().is_validation());
    assert!(harness.billing.start_checkout("ghost", PRO_PRICE).await.unwrap_err().is_not_found());
    assert!(harness.billing.start_checkout("no-email", PRO_PRICE).await.unwrap_err().is_not_found());
    assert!(harness.payments.customers.lock().unwrap().is_empty());
}

#[tokio::test]
async fn webhook_upgrade_lifts_the_daily_limit() {
    let harness = Harness::new();
    harness.store.add_user("user-1", Some("ada@example.com")).await;
    harness.billing.start_checkout("user-1", PRO_PRICE).await.unwrap();

    for _ in 0..FREE_DAILY_LIMIT {
        harness.chat.send_message("user-1", "therapist", "hi").await.unwrap();
    }
    assert!(matches!(
        harness.chat.send_message("user-1", "therapist", "hi").await.unwrap(),
        ChatOutcome::Blocked(_)
    ));

    // Deliver a signed event the way the webhook route does.
    let payload = serde_json::json!({
        "id": "evt_upgrade",
        "type": "customer.subscription.created",
        "data": {"object": {
            "customer": "cus_1",
            "status": "active",
            "items": {"data": [{"price": {"id": PRO_PRICE}}]}
        }}
    })
    .to_string();
    let now = Utc::now();
    let header = sign_payload(WEBHOOK_SECRET, payload.as_bytes(), now.timestamp()).unwrap();
    let event = WebhookVerifier::new(WEBHOOK_SECRET)
        .construct_event(payload.as_bytes(), &header, now)
        .unwrap();
    let WebhookEvent::Subscription(change) = event else {
        panic!("expected a subscription event");
    };
    let outcome = harness.billing.reconcile(&change).await.unwrap();
    assert_eq!(
        outcome,
        ReconcileOutcome::Applied {
            user_id: "user-1".to_string(),
            tier: Tier::Pro
        }
    );

    assert!(matches!(
        harness.chat.send_message("user-1", "therapist", "hi").await.unwrap(),
        ChatOutcome::Replied(_)
    ));
}

#[tokio::test]
async fn webhook_replay_is_idempotent() {
    let harness = Harness::new();
    harness.store.add_user("user-1", Some("ada@example.com")).await;
    harness.billing.start_checkout("user-1", PRO_PRICE).await.unwrap();

    let event = change(SubscriptionChangeKind::Updated, "cus_1", Some(PRO_PRICE));
    harness.billing.reconcile(&event).await.unwrap();
    let first = harness.store.find_by_id("user-1").await.unwrap().unwrap();
    harness.billing.reconcile(&event).await.unwrap();
    let second = harness.store.find_by_id("user-1").await.unwrap().unwrap();

    assert_eq!(first.subscription_tier, Tier::Pro);
    assert_eq!(second.subscription_tier, first.subscription_tier);
}

#[tokio::test]
async fn deleted_or_unmapped_subscriptions_fall_back_to_free() {
    let harness = Harness::new();
    harness.store.add_user("user-1", Some("ada@example.com")).await;
    harness.billing.start_checkout("user-1", PRO_PRICE).await.unwrap();

    harness
        .billing
        .reconcile(&change(SubscriptionChangeKind::Created, "cus_1", Some(PRO_PRICE)))
        .await
        .unwrap();
    assert_eq!(tier_of(&harness, "user-1").await, Tier::Pro);

    harness
        .billing
        .reconcile(&change(SubscriptionChangeKind::Deleted, "cus_1", Some(PRO_PRICE)))
        .await
        .unwrap();
    assert_eq!(tier_of(&harness, "user-1").await, Tier::Free);

    harness
        .billing
        .reconcile(&change(SubscriptionChangeKind::Updated, "cus_1", Some("price_legacy")))
        .await
        .unwrap();
    assert_eq!(tier_of(&harness, "user-1").await, Tier::Free);
}

#[tokio::test]
async fn unknown_customer_is_a_no_op() {
    let harness = Harness::new();
    harness.store.add_user("user-1", Some("ada@example.com")).await;

    let outcome = harness
        .billing
        .reconcile(&change(SubscriptionChangeKind::Created, "cus_unknown", Some(PRO_PRICE)))
        .await
        .unwrap();
    assert_eq!(outcome, ReconcileOutcome::UnknownCustomer);
    assert_eq!(tier_of(&harness, "user-1").await, Tier::Free);
}
