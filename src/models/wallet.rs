//! Wallet model tracking a user's coin balance and lifetime totals

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user coin wallet.
///
/// `balance` is the spendable amount and never goes negative; the lifetime
/// counters only ever grow. One row per user, created lazily on first use.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Wallet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub balance: Decimal,
    pub total_earned: Decimal,
    pub total_spent: Decimal,
    pub total_withdrawn: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Wallet {
    /// Fresh wallet with zeroed amounts for a user.
    pub fn empty(user_id: Uuid) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: Uuid::new_v4(),
            user_id,
            balance: Decimal::ZERO,
            total_earned: Decimal::ZERO,
            total_spent: Decimal::ZERO,
            total_withdrawn: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the wallet can cover a debit of `amount`.
    pub fn can_cover(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }
}
