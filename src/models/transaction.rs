//! Transaction models for the append-only coin ledger

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Transaction types for coin movements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Earn,
    Spend,
    Withdraw,
    Commission,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Earn => "earn",
            Self::Spend => "spend",
            Self::Withdraw => "withdraw",
            Self::Commission => "commission",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "earn" => Some(Self::Earn),
            "spend" => Some(Self::Spend),
            "withdraw" => Some(Self::Withdraw),
            "commission" => Some(Self::Commission),
            _ => None,
        }
    }

    /// Whether this type adds to the balance. Commission follows the earn
    /// convention.
    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Earn | Self::Commission)
    }

    /// The lifetime wallet counter this type feeds.
    pub fn counter_column(&self) -> &'static str {
        match self {
            Self::Earn | Self::Commission => "total_earned",
            Self::Spend => "total_spent",
            Self::Withdraw => "total_withdrawn",
        }
    }
}

/// Immutable record of one balance-affecting event
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tx_type: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub reference_id: Option<Uuid>,
    pub created_at: NaiveDateTime,
}

impl Transaction {
    pub fn transaction_type(&self) -> Option<TransactionType> {
        TransactionType::from_str(&self.tx_type)
    }

    /// Amount with the sign of its balance effect.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type() {
            Some(t) if t.is_credit() => self.amount,
            _ => -self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_string_round_trip() {
        for t in [
            TransactionType::Earn,
            TransactionType::Spend,
            TransactionType::Withdraw,
            TransactionType::Commission,
        ] {
            assert_eq!(TransactionType::from_str(t.as_str()), Some(t));
        }
        assert_eq!(TransactionType::from_str("refund"), None);
    }

    #[test]
    fn test_type_direction() {
        assert!(TransactionType::Earn.is_credit());
        assert!(TransactionType::Commission.is_credit());
        assert!(!TransactionType::Spend.is_credit());
        assert!(!TransactionType::Withdraw.is_credit());
    }

    #[test]
    fn test_counter_columns() {
        assert_eq!(TransactionType::Earn.counter_column(), "total_earned");
        assert_eq!(TransactionType::Commission.counter_column(), "total_earned");
        assert_eq!(TransactionType::Spend.counter_column(), "total_spent");
        assert_eq!(TransactionType::Withdraw.counter_column(), "total_withdrawn");
    }
}
