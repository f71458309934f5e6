mod common;

use advisor_application::{ChatOutcome, FAILED_REPLY_APOLOGY};
use advisor_core::conversation::MessageRole;
use advisor_core::plan::FREE_DAILY_LIMIT;
use advisor_core::usage::UNLIMITED_REMAINING;
use common::Harness;
use std::sync::atomic::Ordering;

fn replied(outcome: ChatOutcome) -> advisor_application::ChatTurn {
    match outcome {
        ChatOutcome::Replied(turn) => turn,
        ChatOutcome::Blocked(quota) => panic!("unexpectedly blocked: {quota:?}"),
    }
}

#[tokio::test]
async fn free_user_is_blocked_after_daily_limit() {
    let harness = Harness::new();
    harness.store.add_user("user-1", Some("ada@example.com")).await;

    for i in 0..FREE_DAILY_LIMIT {
        let turn = replied(
            harness
                .chat
                .send_message("user-1", "therapist", &format!("message {i}"))
                .await
                .unwrap(),
        );
        assert!(!turn.reply_failed);
    }

    let outcome = harness
        .chat
        .send_message("user-1", "therapist", "one more")
        .await
        .unwrap();
    let ChatOutcome::Blocked(quota) = outcome else {
        panic!("expected the 11th message to be blocked");
    };
    assert!(!quota.allowed);
    assert_eq!(quota.remaining, 0);
    assert!(quota.message.unwrap().contains("Upgrade to Pro"));

    // Blocked turns are not stored and never reach the provider.
    assert_eq!(
        harness.provider.calls.load(Ordering::SeqCst),
        FREE_DAILY_LIMIT as usize
    );
    let stored = harness.conversations.load_latest("user-1", "therapist").await.unwrap();
    assert_eq!(stored.messages.len(), 2 * FREE_DAILY_LIMIT as usize);
}

#[tokio::test]
async fn turns_accumulate_in_one_conversation() {
    let harness = Harness::new();
    harness.store.add_user("user-1", None).await;

    let first = replied(
        harness
            .chat
            .send_message("user-1", "business", "How should I price my SaaS?")
            .await
            .unwrap(),
    );
    assert_eq!(first.reply, "echo: How should I price my SaaS?");
    assert_eq!(first.conversation.title, "How should I price my SaaS?");
    assert_eq!(first.quota.remaining, i64::from(FREE_DAILY_LIMIT) - 1);

    let second = replied(
        harness
            .chat
            .send_message("user-1", "business", "And for enterprise?")
            .await
            .unwrap(),
    );
    assert_eq!(second.conversation.id, first.conversation.id);
    assert_eq!(second.conversation.messages.len(), 4);
    assert_eq!(harness.store.conversations().await.len(), 1);

    // Another persona gets its own conversation.
    let other = replied(
        harness
            .chat
            .send_message("user-1", "finance", "Roth or traditional?")
            .await
            .unwrap(),
    );
    assert_ne!(other.conversation.id, first.conversation.id);
}

#[tokio::test]
async fn failed_generation_keeps_message_and_skips_usage() {
    let harness = Harness::new();
    harness.store.add_user("user-1", None).await;
    harness.provider.failing.store(true, Ordering::SeqCst);

    let turn = replied(
        harness
            .chat
            .send_message("user-1", "wellness", "Help me sleep better")
            .await
            .unwrap(),
    );
    assert!(turn.reply_failed);
    assert_eq!(turn.reply, FAILED_REPLY_APOLOGY);

    let messages = &turn.conversation.messages;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::User);
    assert_eq!(messages[0].content, "Help me sleep better");
    assert_eq!(messages[1].content, FAILED_REPLY_APOLOGY);

    let snapshot = harness.usage_meter.snapshot("user-1").await.unwrap();
    assert_eq!(snapshot.used, 0);
}

#[tokio::test]
async fn blank_message_is_rejected() {
    let harness = Harness::new();
    let err = harness
        .chat
        .send_message("user-1", "therapist", "   ")
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn unlimited_tier_is_always_allowed() {
    let harness = Harness::new();
    harness.store.add_user("user-1", None).await;
    advisor_core::user::UserRepository::set_tier(
        harness.store.as_ref(),
        "user-1",
        advisor_core::plan::Tier::Enterprise,
    )
    .await
    .unwrap();

    for _ in 0..(FREE_DAILY_LIMIT + 5) {
        let turn = replied(
            harness
                .chat
                .send_message("user-1", "career", "next step?")
                .await
                .unwrap(),
        );
        assert!(turn.quota.allowed);
        assert_eq!(turn.quota.remaining, UNLIMITED_REMAINING);
        assert_eq!(turn.quota.limit, None);
    }
}

#[tokio::test]
async fn analytics_reflect_saved_conversations() {
    let harness = Harness::new();
    harness.store.add_user("user-1", None).await;
    for persona in ["creative", "business", "business"] {
        harness
            .chat
            .send_message("user-1", persona, "hello")
            .await
            .unwrap();
    }

    let analytics = harness.analytics.summarize_for_user("user-1").await.unwrap();
    assert_eq!(analytics.total_conversations, 2);
    assert_eq!(analytics.total_messages, 6);
    // Tied at one row each; the newest conversation is encountered first.
    assert_eq!(analytics.favorite_persona, "business");
    assert_eq!(analytics.this_week_messages, 6);
    assert_eq!(analytics.active_days, 1);

    let events = harness.store.events().await;
    assert_eq!(events.len(), 3);
    assert_eq!(events[1].event_data["persona_id"], "business");
}

#[tokio::test]
async fn goal_lifecycle() {
    let harness = Harness::new();
    let goal = harness
        .goals
        .create(advisor_core::goal::NewGoal {
            user_id: "user-1".to_string(),
            title: "  Run a half marathon ".to_string(),
            description: None,
            persona_id: Some("wellness".to_string()),
            target_date: None,
        })
        .await
        .unwrap();
    assert_eq!(goal.title, "Run a half marathon");
    assert_eq!(goal.progress, 0);

    let updated = harness
        .goals
        .update_progress("user-1", &goal.id, 60)
        .await
        .unwrap();
    assert_eq!(updated.progress, 60);

    assert!(
        harness
            .goals
            .update_progress("user-2", &goal.id, 70)
            .await
            .unwrap_err()
            .is_not_found()
    );

    let completed = harness.goals.complete("user-1", &goal.id).await.unwrap();
    assert!(completed.is_completed());
    assert_eq!(completed.progress, 100);
    let again = harness.goals.complete("user-1", &goal.id).await.unwrap();
    assert_eq!(again.updated_at, completed.updated_at);

    assert!(
        harness
            .goals
            .update_progress("user-1", &goal.id, 10)
            .await
            .unwrap_err()
            .is_validation()
    );

    harness.goals.delete("user-1", &goal.id).await.unwrap();
    assert!(harness.goals.list("user-1").await.unwrap().is_empty());
}
