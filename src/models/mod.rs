//! Domain models for the Eduminity coin ledger.
//!
//! This module contains all database-backed models representing
//! the entities of the coin economy.

pub mod ad_view;
pub mod donation;
pub mod transaction;
pub mod wallet;

// Re-export all models for convenient access
pub use ad_view::AdView;
pub use donation::{Donation, DonationFeedItem};
pub use transaction::{Transaction, TransactionType};
pub use wallet::Wallet;
