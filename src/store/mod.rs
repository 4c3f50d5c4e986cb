//! Data-access boundary for the coin ledger.
//!
//! Every balance mutation goes through [`LedgerStore`] as one atomic unit:
//! the wallet update and the matching transaction row (plus any donation or
//! ad-view row) either all commit or none do. Implementations must also
//! guarantee that a debit can never drive a balance negative, even under
//! concurrent calls for the same user.

pub mod memory;
pub mod postgres;

pub use memory::MemoryLedgerStore;
pub use postgres::PgLedgerStore;

use crate::error::StoreError;
use crate::models::{AdView, Donation, Transaction, TransactionType, Wallet};
use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

/// One balance-affecting ledger posting, validated by the service layer.
///
/// `amount` is a positive magnitude; the balance direction and the lifetime
/// counter follow from `tx_type`.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub user_id: Uuid,
    pub tx_type: TransactionType,
    pub amount: Decimal,
    pub description: Option<String>,
    pub reference_id: Option<Uuid>,
}

/// Donation row to be written together with the donor's debit
#[derive(Debug, Clone)]
pub struct NewDonation {
    pub id: Uuid,
    pub donor_user_id: Uuid,
    pub amount: Decimal,
    pub message: Option<String>,
    pub is_anonymous: bool,
}

/// Ad-view row to be written together with the viewer's credit
#[derive(Debug, Clone)]
pub struct NewAdView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub coins_earned: Decimal,
    pub ad_type: String,
}

#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Fetch a wallet if it exists.
    async fn find_wallet(&self, user_id: Uuid) -> Result<Option<Wallet>, StoreError>;

    /// Fetch a wallet, creating a zeroed one if the user has none yet.
    async fn ensure_wallet(&self, user_id: Uuid) -> Result<Wallet, StoreError>;

    /// Apply one ledger entry: mutate the wallet and append the transaction
    /// row atomically. Credits create the wallet lazily; debits require an
    /// existing wallet whose balance covers the amount.
    async fn apply_entry(&self, entry: &LedgerEntry) -> Result<Wallet, StoreError>;

    /// Write the donation row and apply the donor's debit in one atomic
    /// unit. On insufficient balance nothing is written.
    async fn record_donation(
        &self,
        donation: &NewDonation,
        entry: &LedgerEntry,
    ) -> Result<(Donation, Wallet), StoreError>;

    /// Write the ad-view row and apply the viewer's credit in one atomic
    /// unit.
    async fn record_ad_view(
        &self,
        view: &NewAdView,
        entry: &LedgerEntry,
    ) -> Result<(AdView, Wallet), StoreError>;

    /// A user's transactions, newest first.
    async fn transactions_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Most recent donations across all donors, newest first.
    async fn recent_donations(&self, limit: i64) -> Result<Vec<Donation>, StoreError>;

    /// A user's recorded ad views, newest first.
    async fn ad_views_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AdView>, StoreError>;
}
