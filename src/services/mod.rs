pub mod ledger_service;
pub mod wallet_history;

pub use ledger_service::{AdRewardReceipt, DonationReceipt, LedgerService};
pub use wallet_history::WalletHistoryService;
