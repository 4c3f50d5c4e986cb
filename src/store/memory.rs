//! In-process ledger store with the same atomicity contract as the
//! PostgreSQL store: one lock is held across each compound mutation, so
//! concurrent debits serialize and the balance check cannot be interleaved.
//!
//! Used by the test suite and by consumers that need the ledger core
//! without a database.

use crate::error::StoreError;
use crate::models::{AdView, Donation, Transaction, Wallet};
use crate::store::{LedgerEntry, LedgerStore, NewAdView, NewDonation};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct MemoryState {
    wallets: HashMap<Uuid, Wallet>,
    transactions: Vec<Transaction>,
    donations: Vec<Donation>,
    ad_views: Vec<AdView>,
}

#[derive(Default)]
pub struct MemoryLedgerStore {
    state: Mutex<MemoryState>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn mutate_wallet(state: &mut MemoryState, entry: &LedgerEntry) -> Result<Wallet, StoreError> {
        let now = chrono::Utc::now().naive_utc();

        if entry.tx_type.is_credit() {
            let wallet = state
                .wallets
                .entry(entry.user_id)
                .or_insert_with(|| Wallet::empty(entry.user_id));
            wallet.balance += entry.amount;
            wallet.total_earned += entry.amount;
            wallet.updated_at = now;
            Ok(wallet.clone())
        } else {
            let wallet = state
                .wallets
                .get_mut(&entry.user_id)
                .ok_or(StoreError::WalletNotFound(entry.user_id))?;

            if !wallet.can_cover(entry.amount) {
                return Err(StoreError::InsufficientBalance {
                    available: wallet.balance,
                    required: entry.amount,
                });
            }

            wallet.balance -= entry.amount;
            match entry.tx_type.counter_column() {
                "total_withdrawn" => wallet.total_withdrawn += entry.amount,
                _ => wallet.total_spent += entry.amount,
            }
            wallet.updated_at = now;
            Ok(wallet.clone())
        }
    }

    fn push_transaction(state: &mut MemoryState, entry: &LedgerEntry) -> Transaction {
        let transaction = Transaction {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            tx_type: entry.tx_type.as_str().to_string(),
            amount: entry.amount,
            description: entry.description.clone(),
            reference_id: entry.reference_id,
            created_at: chrono::Utc::now().naive_utc(),
        };
        state.transactions.push(transaction.clone());
        transaction
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn find_wallet(&self, user_id: Uuid) -> Result<Option<Wallet>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state.wallets.get(&user_id).cloned())
    }

    async fn ensure_wallet(&self, user_id: Uuid) -> Result<Wallet, StoreError> {
        let mut state = self.state.lock().unwrap();
        let wallet = state
            .wallets
            .entry(user_id)
            .or_insert_with(|| Wallet::empty(user_id));
        Ok(wallet.clone())
    }

    async fn apply_entry(&self, entry: &LedgerEntry) -> Result<Wallet, StoreError> {
        let mut state = self.state.lock().unwrap();
        let wallet = Self::mutate_wallet(&mut state, entry)?;
        Self::push_transaction(&mut state, entry);
        Ok(wallet)
    }

    async fn record_donation(
        &self,
        donation: &NewDonation,
        entry: &LedgerEntry,
    ) -> Result<(Donation, Wallet), StoreError> {
        let mut state = self.state.lock().unwrap();

        // Debit first: on insufficient balance nothing is recorded
        let wallet = Self::mutate_wallet(&mut state, entry)?;

        let row = Donation {
            id: donation.id,
            donor_user_id: donation.donor_user_id,
            amount: donation.amount,
            message: donation.message.clone(),
            is_anonymous: donation.is_anonymous,
            created_at: chrono::Utc::now().naive_utc(),
        };
        state.donations.push(row.clone());
        Self::push_transaction(&mut state, entry);

        Ok((row, wallet))
    }

    async fn record_ad_view(
        &self,
        view: &NewAdView,
        entry: &LedgerEntry,
    ) -> Result<(AdView, Wallet), StoreError> {
        let mut state = self.state.lock().unwrap();

        let row = AdView {
            id: view.id,
            user_id: view.user_id,
            coins_earned: view.coins_earned,
            ad_type: view.ad_type.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        state.ad_views.push(row.clone());

        let wallet = Self::mutate_wallet(&mut state, entry)?;
        Self::push_transaction(&mut state, entry);

        Ok((row, wallet))
    }

    async fn transactions_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, StoreError> {
        let state = self.state.lock().unwrap();
        let transactions = state
            .transactions
            .iter()
            .rev()
            .filter(|t| t.user_id == user_id)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();
        Ok(transactions)
    }

    async fn recent_donations(&self, limit: i64) -> Result<Vec<Donation>, StoreError> {
        let state = self.state.lock().unwrap();
        let donations = state
            .donations
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect();
        Ok(donations)
    }

    async fn ad_views_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AdView>, StoreError> {
        let state = self.state.lock().unwrap();
        let views = state
            .ad_views
            .iter()
            .rev()
            .filter(|v| v.user_id == user_id)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();
        Ok(views)
    }
}
