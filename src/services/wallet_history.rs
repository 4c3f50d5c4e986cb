//! Read-only wallet views: summary, transaction history, donation feed.
//!
//! No business rules beyond reflecting what the ledger wrote.

use crate::config::LedgerConfig;
use crate::error::AppResult;
use crate::models::{DonationFeedItem, Transaction, Wallet};
use crate::store::LedgerStore;
use std::sync::Arc;
use uuid::Uuid;

/// Hard cap on a single history page, whatever the caller asks for
const MAX_PAGE_SIZE: i64 = 100;

/// Hard cap on the donation feed
const MAX_FEED_LIMIT: i64 = 50;

pub struct WalletHistoryService {
    store: Arc<dyn LedgerStore>,
    config: LedgerConfig,
}

impl WalletHistoryService {
    pub fn new(store: Arc<dyn LedgerStore>, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    /// Wallet overview for display. A user who has never touched the
    /// ledger sees a zeroed wallet rather than an error.
    pub async fn wallet_summary(&self, user_id: Uuid) -> AppResult<Wallet> {
        Ok(self.store.ensure_wallet(user_id).await?)
    }

    /// One page of a user's transactions, newest first.
    pub async fn transactions(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> AppResult<Vec<Transaction>> {
        let limit = limit
            .unwrap_or(self.config.history_page_size)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = offset.unwrap_or(0).max(0);

        Ok(self
            .store
            .transactions_for_user(user_id, limit, offset)
            .await?)
    }

    /// The public recent-donations feed. Donor identity is withheld for
    /// anonymous rows.
    pub async fn recent_donations(&self, limit: Option<i64>) -> AppResult<Vec<DonationFeedItem>> {
        let limit = limit
            .unwrap_or(self.config.donation_feed_limit)
            .clamp(1, MAX_FEED_LIMIT);

        let donations = self.store.recent_donations(limit).await?;
        Ok(donations.into_iter().map(DonationFeedItem::from).collect())
    }
}
