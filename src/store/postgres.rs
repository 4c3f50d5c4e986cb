//! PostgreSQL-backed ledger store.
//!
//! Debits use a single conditional `UPDATE ... WHERE balance >= amount`
//! so two concurrent debits for the same user can never overdraw the
//! wallet, and every compound write runs inside one database transaction.

use crate::error::StoreError;
use crate::models::{AdView, Donation, Transaction, Wallet};
use crate::store::{LedgerEntry, LedgerStore, NewAdView, NewDonation};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction as PgTransaction};
use uuid::Uuid;

const WALLET_COLUMNS: &str =
    "id, user_id, balance, total_earned, total_spent, total_withdrawn, created_at, updated_at";

const TRANSACTION_COLUMNS: &str =
    "id, user_id, tx_type, amount, description, reference_id, created_at";

const DONATION_COLUMNS: &str = "id, donor_user_id, amount, message, is_anonymous, created_at";

#[derive(Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
}

impl PgLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Credit the wallet inside an open transaction, creating it on first
    /// use. The lifetime earned counter grows with the balance.
    async fn credit_wallet(
        tx: &mut PgTransaction<'_, Postgres>,
        entry: &LedgerEntry,
    ) -> Result<Wallet, StoreError> {
        let sql = format!(
            "INSERT INTO wallets (id, user_id, balance, total_earned) \
             VALUES ($1, $2, $3, $3) \
             ON CONFLICT (user_id) DO UPDATE \
             SET balance = wallets.balance + $3, \
                 total_earned = wallets.total_earned + $3, \
                 updated_at = NOW() \
             RETURNING {WALLET_COLUMNS}"
        );

        let wallet = sqlx::query_as::<_, Wallet>(&sql)
            .bind(Uuid::new_v4())
            .bind(entry.user_id)
            .bind(entry.amount)
            .fetch_one(&mut **tx)
            .await?;

        Ok(wallet)
    }

    /// Debit the wallet inside an open transaction. The balance check and
    /// the subtraction are one conditional update; when no row matches we
    /// look the wallet up to tell a missing wallet from a short one.
    async fn debit_wallet(
        tx: &mut PgTransaction<'_, Postgres>,
        entry: &LedgerEntry,
    ) -> Result<Wallet, StoreError> {
        let counter = entry.tx_type.counter_column();
        let sql = format!(
            "UPDATE wallets \
             SET balance = balance - $2, {counter} = {counter} + $2, updated_at = NOW() \
             WHERE user_id = $1 AND balance >= $2 \
             RETURNING {WALLET_COLUMNS}"
        );

        let updated = sqlx::query_as::<_, Wallet>(&sql)
            .bind(entry.user_id)
            .bind(entry.amount)
            .fetch_optional(&mut **tx)
            .await?;

        match updated {
            Some(wallet) => Ok(wallet),
            None => {
                let sql = format!("SELECT {WALLET_COLUMNS} FROM wallets WHERE user_id = $1");
                let existing = sqlx::query_as::<_, Wallet>(&sql)
                    .bind(entry.user_id)
                    .fetch_optional(&mut **tx)
                    .await?;

                match existing {
                    Some(wallet) => Err(StoreError::InsufficientBalance {
                        available: wallet.balance,
                        required: entry.amount,
                    }),
                    None => Err(StoreError::WalletNotFound(entry.user_id)),
                }
            }
        }
    }

    async fn apply_wallet_mutation(
        tx: &mut PgTransaction<'_, Postgres>,
        entry: &LedgerEntry,
    ) -> Result<Wallet, StoreError> {
        if entry.tx_type.is_credit() {
            Self::credit_wallet(tx, entry).await
        } else {
            Self::debit_wallet(tx, entry).await
        }
    }

    async fn insert_transaction(
        tx: &mut PgTransaction<'_, Postgres>,
        entry: &LedgerEntry,
    ) -> Result<Transaction, StoreError> {
        let sql = format!(
            "INSERT INTO transactions (id, user_id, tx_type, amount, description, reference_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {TRANSACTION_COLUMNS}"
        );

        let transaction = sqlx::query_as::<_, Transaction>(&sql)
            .bind(Uuid::new_v4())
            .bind(entry.user_id)
            .bind(entry.tx_type.as_str())
            .bind(entry.amount)
            .bind(entry.description.as_deref())
            .bind(entry.reference_id)
            .fetch_one(&mut **tx)
            .await?;

        Ok(transaction)
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    async fn find_wallet(&self, user_id: Uuid) -> Result<Option<Wallet>, StoreError> {
        let sql = format!("SELECT {WALLET_COLUMNS} FROM wallets WHERE user_id = $1");
        let wallet = sqlx::query_as::<_, Wallet>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(wallet)
    }

    async fn ensure_wallet(&self, user_id: Uuid) -> Result<Wallet, StoreError> {
        // Plain read first so repeated summaries leave the row untouched
        if let Some(wallet) = self.find_wallet(user_id).await? {
            return Ok(wallet);
        }

        let sql = format!(
            "INSERT INTO wallets (id, user_id) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET updated_at = wallets.updated_at \
             RETURNING {WALLET_COLUMNS}"
        );

        let wallet = sqlx::query_as::<_, Wallet>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(wallet)
    }

    async fn apply_entry(&self, entry: &LedgerEntry) -> Result<Wallet, StoreError> {
        let mut tx = self.pool.begin().await?;

        let wallet = Self::apply_wallet_mutation(&mut tx, entry).await?;
        Self::insert_transaction(&mut tx, entry).await?;

        tx.commit().await?;

        Ok(wallet)
    }

    async fn record_donation(
        &self,
        donation: &NewDonation,
        entry: &LedgerEntry,
    ) -> Result<(Donation, Wallet), StoreError> {
        let mut tx = self.pool.begin().await?;

        // Debit first: on insufficient balance the donation row is never written
        let wallet = Self::debit_wallet(&mut tx, entry).await?;

        let sql = format!(
            "INSERT INTO donations (id, donor_user_id, amount, message, is_anonymous) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {DONATION_COLUMNS}"
        );

        let row = sqlx::query_as::<_, Donation>(&sql)
            .bind(donation.id)
            .bind(donation.donor_user_id)
            .bind(donation.amount)
            .bind(donation.message.as_deref())
            .bind(donation.is_anonymous)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_transaction(&mut tx, entry).await?;

        tx.commit().await?;

        Ok((row, wallet))
    }

    async fn record_ad_view(
        &self,
        view: &NewAdView,
        entry: &LedgerEntry,
    ) -> Result<(AdView, Wallet), StoreError> {
        let mut tx = self.pool.begin().await?;

        let sql = "INSERT INTO ad_views (id, user_id, coins_earned, ad_type) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, user_id, coins_earned, ad_type, created_at";

        let row = sqlx::query_as::<_, AdView>(sql)
            .bind(view.id)
            .bind(view.user_id)
            .bind(view.coins_earned)
            .bind(&view.ad_type)
            .fetch_one(&mut *tx)
            .await?;

        let wallet = Self::credit_wallet(&mut tx, entry).await?;
        Self::insert_transaction(&mut tx, entry).await?;

        tx.commit().await?;

        Ok((row, wallet))
    }

    async fn transactions_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, StoreError> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );

        let transactions = sqlx::query_as::<_, Transaction>(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(transactions)
    }

    async fn recent_donations(&self, limit: i64) -> Result<Vec<Donation>, StoreError> {
        let sql = format!(
            "SELECT {DONATION_COLUMNS} FROM donations \
             ORDER BY created_at DESC \
             LIMIT $1"
        );

        let donations = sqlx::query_as::<_, Donation>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(donations)
    }

    async fn ad_views_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AdView>, StoreError> {
        let sql = "SELECT id, user_id, coins_earned, ad_type, created_at FROM ad_views \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2";

        let views = sqlx::query_as::<_, AdView>(sql)
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(views)
    }
}
