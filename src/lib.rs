pub mod api;
pub mod api_docs;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod services;

pub use domain::{Clock, DomainError, ManualClock, SystemClock};
pub use infrastructure::{AppState, Config};
pub use services::{Ledger, LedgerPolicy};
