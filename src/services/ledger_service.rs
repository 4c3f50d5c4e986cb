use crate::config::LedgerConfig;
use crate::error::{AppError, AppResult};
use crate::models::{AdView, Donation, TransactionType, Wallet};
use crate::store::{LedgerEntry, LedgerStore, NewAdView, NewDonation};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Transaction description stamped on ad-reward credits
pub const AD_REWARD_DESCRIPTION: &str = "Earned from watching advertisement";

/// Transaction description stamped on donation debits
pub const DONATION_DESCRIPTION: &str = "Donation to help students access free materials";

/// Service owning the rules for mutating coin balances.
///
/// All validation happens before any store I/O; the store then commits the
/// wallet mutation and the transaction record as one atomic unit.
pub struct LedgerService {
    store: Arc<dyn LedgerStore>,
    config: LedgerConfig,
}

/// Outcome of a claimed ad reward
#[derive(Debug, Clone, serde::Serialize)]
pub struct AdRewardReceipt {
    pub ad_view: AdView,
    pub wallet: Wallet,
}

/// Outcome of a completed donation
#[derive(Debug, Clone, serde::Serialize)]
pub struct DonationReceipt {
    pub donation: Donation,
    pub wallet: Wallet,
}

impl LedgerService {
    pub fn new(store: Arc<dyn LedgerStore>, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    fn validate_amount(amount: Decimal) -> AppResult<()> {
        if amount <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(amount));
        }
        Ok(())
    }

    /// Add coins to a user's wallet and append the matching transaction.
    ///
    /// The wallet is created lazily on first credit. `tx_type` must be a
    /// credit-like type (`earn` or `commission`).
    pub async fn credit(
        &self,
        user_id: Uuid,
        amount: Decimal,
        description: &str,
        tx_type: TransactionType,
        reference_id: Option<Uuid>,
    ) -> AppResult<Wallet> {
        Self::validate_amount(amount)?;
        if !tx_type.is_credit() {
            return Err(AppError::InvalidTransaction(format!(
                "{} cannot credit a wallet",
                tx_type.as_str()
            )));
        }

        info!(
            "Crediting wallet: user={}, type={}, amount={}",
            user_id,
            tx_type.as_str(),
            amount
        );

        let entry = LedgerEntry {
            user_id,
            tx_type,
            amount,
            description: Some(description.to_string()),
            reference_id,
        };

        Ok(self.store.apply_entry(&entry).await?)
    }

    /// Remove coins from a user's wallet and append the matching
    /// transaction.
    ///
    /// Fails with `InsufficientBalance` when the wallet cannot cover
    /// `amount`; the check and the subtraction are atomic in the store, so
    /// concurrent debits cannot overdraw. `tx_type` must be a debit-like
    /// type (`spend` or `withdraw`).
    pub async fn debit(
        &self,
        user_id: Uuid,
        amount: Decimal,
        description: &str,
        tx_type: TransactionType,
        reference_id: Option<Uuid>,
    ) -> AppResult<Wallet> {
        Self::validate_amount(amount)?;
        if tx_type.is_credit() {
            return Err(AppError::InvalidTransaction(format!(
                "{} cannot debit a wallet",
                tx_type.as_str()
            )));
        }

        info!(
            "Debiting wallet: user={}, type={}, amount={}",
            user_id,
            tx_type.as_str(),
            amount
        );

        let entry = LedgerEntry {
            user_id,
            tx_type,
            amount,
            description: Some(description.to_string()),
            reference_id,
        };

        Ok(self.store.apply_entry(&entry).await?)
    }

    /// Record an ad view and credit the configured reward.
    ///
    /// No server-side proof of ad completion exists; callers are trusted.
    pub async fn claim_ad_reward(&self, user_id: Uuid, ad_type: &str) -> AppResult<AdRewardReceipt> {
        let amount = Decimal::from(self.config.ad_reward_coins);
        let view_id = Uuid::new_v4();

        info!(
            "Ad reward claim: user={}, ad_type={}, coins={}",
            user_id, ad_type, amount
        );

        let view = NewAdView {
            id: view_id,
            user_id,
            coins_earned: amount,
            ad_type: ad_type.to_string(),
        };

        let entry = LedgerEntry {
            user_id,
            tx_type: TransactionType::Earn,
            amount,
            description: Some(AD_REWARD_DESCRIPTION.to_string()),
            reference_id: Some(view_id),
        };

        let (ad_view, wallet) = self.store.record_ad_view(&view, &entry).await?;

        Ok(AdRewardReceipt { ad_view, wallet })
    }

    /// Record a donation and debit the donor.
    ///
    /// Donated coins are retired; no recipient wallet is credited. On
    /// insufficient balance nothing is written.
    pub async fn donate(
        &self,
        donor_user_id: Uuid,
        amount: Decimal,
        message: Option<String>,
        is_anonymous: bool,
    ) -> AppResult<DonationReceipt> {
        Self::validate_amount(amount)?;

        let donation_id = Uuid::new_v4();

        info!(
            "Donation: donor={}, amount={}, anonymous={}",
            donor_user_id, amount, is_anonymous
        );

        let donation = NewDonation {
            id: donation_id,
            donor_user_id,
            amount,
            message: message.filter(|m| !m.trim().is_empty()),
            is_anonymous,
        };

        let entry = LedgerEntry {
            user_id: donor_user_id,
            tx_type: TransactionType::Spend,
            amount,
            description: Some(DONATION_DESCRIPTION.to_string()),
            reference_id: Some(donation_id),
        };

        let (donation, wallet) = self.store.record_donation(&donation, &entry).await?;

        Ok(DonationReceipt { donation, wallet })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryLedgerStore;

    fn service() -> LedgerService {
        LedgerService::new(Arc::new(MemoryLedgerStore::new()), LedgerConfig::default())
    }

    #[tokio::test]
    async fn test_credit_rejects_non_positive_amount() {
        let svc = service();
        let user = Uuid::new_v4();

        let zero = svc
            .credit(user, Decimal::ZERO, "test", TransactionType::Earn, None)
            .await;
        assert!(matches!(zero, Err(AppError::InvalidAmount(_))));

        let negative = svc
            .credit(
                user,
                Decimal::new(-5, 0),
                "test",
                TransactionType::Earn,
                None,
            )
            .await;
        assert!(matches!(negative, Err(AppError::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn test_credit_rejects_debit_type() {
        let svc = service();
        let result = svc
            .credit(
                Uuid::new_v4(),
                Decimal::new(5, 0),
                "test",
                TransactionType::Spend,
                None,
            )
            .await;
        assert!(matches!(result, Err(AppError::InvalidTransaction(_))));
    }

    #[tokio::test]
    async fn test_debit_rejects_credit_type() {
        let svc = service();
        let result = svc
            .debit(
                Uuid::new_v4(),
                Decimal::new(5, 0),
                "test",
                TransactionType::Commission,
                None,
            )
            .await;
        assert!(matches!(result, Err(AppError::InvalidTransaction(_))));
    }

    #[tokio::test]
    async fn test_donate_blank_message_stored_as_none() {
        let svc = service();
        let user = Uuid::new_v4();

        svc.credit(
            user,
            Decimal::new(50, 0),
            "seed",
            TransactionType::Earn,
            None,
        )
        .await
        .unwrap();

        let receipt = svc
            .donate(user, Decimal::new(10, 0), Some("   ".to_string()), false)
            .await
            .unwrap();
        assert!(receipt.donation.message.is_none());
    }
}
