mod helpers;

use helpers::*;
use eduminity_backend::models::TransactionType;
use uuid::Uuid;

// ============================================================================
// Wallet Summary
// ============================================================================

#[tokio::test]
async fn test_fresh_user_sees_zeroed_wallet() {
    let t = TestLedger::new();
    let user = Uuid::new_v4();

    let wallet = t.history.wallet_summary(user).await.unwrap();
    assert_eq!(wallet.user_id, user);
    assert_eq!(wallet.balance, coins(0));
    assert_eq!(wallet.total_earned, coins(0));
    assert_eq!(wallet.total_spent, coins(0));
    assert_eq!(wallet.total_withdrawn, coins(0));
}

#[tokio::test]
async fn test_summary_is_idempotent() {
    let t = TestLedger::new();
    let user = Uuid::new_v4();
    t.seed_balance(user, coins(55)).await;

    let first = t.history.wallet_summary(user).await.unwrap();
    let second = t.history.wallet_summary(user).await.unwrap();

    assert_wallets_equal(&first, &second);
}

// ============================================================================
// Transaction History
// ============================================================================

#[tokio::test]
async fn test_history_is_idempotent() {
    let t = TestLedger::new();
    let user = Uuid::new_v4();
    t.seed_balance(user, coins(20)).await;
    t.ledger.claim_ad_reward(user, "video").await.unwrap();

    let first = t.history.transactions(user, None, None).await.unwrap();
    let second = t.history.transactions(user, None, None).await.unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.amount, b.amount);
        assert_eq!(a.tx_type, b.tx_type);
    }
}

#[tokio::test]
async fn test_history_is_newest_first_and_paginated() {
    let t = TestLedger::new();
    let user = Uuid::new_v4();

    for i in 1..=25 {
        t.ledger
            .credit(
                user,
                coins(i),
                &format!("Credit {}", i),
                TransactionType::Earn,
                None,
            )
            .await
            .unwrap();
    }

    // Default page size is 20
    let first_page = t.history.transactions(user, None, None).await.unwrap();
    assert_eq!(first_page.len(), 20);
    assert_eq!(first_page[0].description.as_deref(), Some("Credit 25"));
    assert_eq!(first_page[19].description.as_deref(), Some("Credit 6"));

    let second_page = t
        .history
        .transactions(user, None, Some(20))
        .await
        .unwrap();
    assert_eq!(second_page.len(), 5);
    assert_eq!(second_page[0].description.as_deref(), Some("Credit 5"));
    assert_eq!(second_page[4].description.as_deref(), Some("Credit 1"));
}

#[tokio::test]
async fn test_history_scoped_to_requesting_user() {
    let t = TestLedger::new();
    let user_a = Uuid::new_v4();
    let user_b = Uuid::new_v4();

    t.seed_balance(user_a, coins(10)).await;
    t.seed_balance(user_b, coins(20)).await;

    let for_a = t.history.transactions(user_a, None, None).await.unwrap();
    assert_eq!(for_a.len(), 1);
    assert!(for_a.iter().all(|tx| tx.user_id == user_a));
}

#[tokio::test]
async fn test_history_limit_is_clamped() {
    let t = TestLedger::new();
    let user = Uuid::new_v4();
    t.seed_balance(user, coins(10)).await;
    t.ledger.claim_ad_reward(user, "video").await.unwrap();

    // A nonsensical limit still returns at least one row
    let page = t.history.transactions(user, Some(0), None).await.unwrap();
    assert_eq!(page.len(), 1);
}

// ============================================================================
// Donation Feed
// ============================================================================

#[tokio::test]
async fn test_feed_hides_anonymous_donors() {
    let t = TestLedger::new();
    let named = Uuid::new_v4();
    let anonymous = Uuid::new_v4();

    t.seed_balance(named, coins(50)).await;
    t.seed_balance(anonymous, coins(50)).await;

    t.ledger
        .donate(named, coins(10), Some("keep going".to_string()), false)
        .await
        .unwrap();
    t.ledger
        .donate(anonymous, coins(15), None, true)
        .await
        .unwrap();

    let feed = t.history.recent_donations(None).await.unwrap();
    assert_eq!(feed.len(), 2);

    // Newest first: the anonymous donation leads
    assert!(feed[0].is_anonymous);
    assert!(feed[0].donor_user_id.is_none());
    assert_eq!(feed[0].amount, coins(15));

    assert!(!feed[1].is_anonymous);
    assert_eq!(feed[1].donor_user_id, Some(named));
    assert_eq!(feed[1].message.as_deref(), Some("keep going"));
}

#[tokio::test]
async fn test_feed_respects_limit() {
    let t = TestLedger::new();
    let user = Uuid::new_v4();
    t.seed_balance(user, coins(100)).await;

    for _ in 0..5 {
        t.ledger.donate(user, coins(2), None, false).await.unwrap();
    }

    let feed = t.history.recent_donations(Some(3)).await.unwrap();
    assert_eq!(feed.len(), 3);
}
