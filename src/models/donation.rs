//! Donation records backing the community support page

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A donor-initiated coin contribution. Donated coins are retired from the
/// donor's wallet; there is no receiving wallet.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Donation {
    pub id: Uuid,
    pub donor_user_id: Uuid,
    pub amount: Decimal,
    pub message: Option<String>,
    pub is_anonymous: bool,
    pub created_at: NaiveDateTime,
}

/// Donation as shown on the public feed. The donor id is withheld for
/// anonymous donations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationFeedItem {
    pub id: Uuid,
    pub donor_user_id: Option<Uuid>,
    pub amount: Decimal,
    pub message: Option<String>,
    pub is_anonymous: bool,
    pub created_at: NaiveDateTime,
}

impl From<Donation> for DonationFeedItem {
    fn from(d: Donation) -> Self {
        let donor = if d.is_anonymous {
            None
        } else {
            Some(d.donor_user_id)
        };
        Self {
            id: d.id,
            donor_user_id: donor,
            amount: d.amount,
            message: d.message,
            is_anonymous: d.is_anonymous,
            created_at: d.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donation(is_anonymous: bool) -> Donation {
        Donation {
            id: Uuid::new_v4(),
            donor_user_id: Uuid::new_v4(),
            amount: Decimal::new(30, 0),
            message: Some("good luck".to_string()),
            is_anonymous,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn test_feed_item_hides_anonymous_donor() {
        let item = DonationFeedItem::from(donation(true));
        assert!(item.donor_user_id.is_none());
        assert!(item.is_anonymous);
    }

    #[test]
    fn test_feed_item_keeps_named_donor() {
        let d = donation(false);
        let donor = d.donor_user_id;
        let item = DonationFeedItem::from(d);
        assert_eq!(item.donor_user_id, Some(donor));
    }
}
