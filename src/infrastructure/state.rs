//! Application state shared across all handlers

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::services::Ledger;

/// One ledger per process, behind a single lock.
///
/// Every mutating handler holds the write guard for the whole ledger call, so
/// check-then-act sequences such as `issue` and id assignment cannot
/// interleave between requests.
#[derive(Clone)]
pub struct AppState {
    ledger: Arc<RwLock<Ledger>>,
}

impl AppState {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
        }
    }

    pub fn ledger(&self) -> &RwLock<Ledger> {
        &self.ledger
    }
}
