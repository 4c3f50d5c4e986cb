use eduminity_backend::config::LedgerConfig;
use eduminity_backend::models::{TransactionType, Wallet};
use eduminity_backend::services::{LedgerService, WalletHistoryService};
use eduminity_backend::store::MemoryLedgerStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// In-process ledger harness used by the integration tests
pub struct TestLedger {
    pub store: Arc<MemoryLedgerStore>,
    pub ledger: Arc<LedgerService>,
    pub history: Arc<WalletHistoryService>,
}

impl TestLedger {
    /// Create a harness with the default coin-economy configuration
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create a harness with a custom configuration
    pub fn with_config(config: LedgerConfig) -> Self {
        let store = Arc::new(MemoryLedgerStore::new());
        let ledger = Arc::new(LedgerService::new(store.clone(), config.clone()));
        let history = Arc::new(WalletHistoryService::new(store.clone(), config));

        Self {
            store,
            ledger,
            history,
        }
    }

    /// Give a user an opening balance through a normal earn credit
    pub async fn seed_balance(&self, user_id: Uuid, amount: Decimal) -> Wallet {
        self.ledger
            .credit(
                user_id,
                amount,
                "Initial top-up",
                TransactionType::Earn,
                None,
            )
            .await
            .expect("Failed to seed balance")
    }
}

/// Whole-coin amount shorthand
pub fn coins(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

/// Assert that two wallets are equal (ignoring timestamps)
pub fn assert_wallets_equal(a: &Wallet, b: &Wallet) {
    assert_eq!(a.id, b.id);
    assert_eq!(a.user_id, b.user_id);
    assert_eq!(a.balance, b.balance);
    assert_eq!(a.total_earned, b.total_earned);
    assert_eq!(a.total_spent, b.total_spent);
    assert_eq!(a.total_withdrawn, b.total_withdrawn);
}
