//! Eduminity Coin Ledger Library
//!
//! This module exposes the ledger components for use by the service
//! binary, tests, and other consumers.

pub mod config;
pub mod database;
pub mod error;
pub mod http;
pub mod identity;
pub mod models;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use config::LedgerConfig;
use services::{LedgerService, WalletHistoryService};
use std::sync::Arc;
use store::LedgerStore;

/// Application state containing the ledger services
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<LedgerService>,
    pub history: Arc<WalletHistoryService>,
}

impl AppState {
    /// Create a new AppState over the given ledger store
    pub fn new(store: Arc<dyn LedgerStore>, config: LedgerConfig) -> Self {
        Self {
            ledger: Arc::new(LedgerService::new(store.clone(), config.clone())),
            history: Arc::new(WalletHistoryService::new(store, config)),
        }
    }
}
