use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Record of one completed ad watch and the coins it earned
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AdView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub coins_earned: Decimal,
    pub ad_type: String,
    pub created_at: NaiveDateTime,
}
