//! Services Layer
//!
//! This module contains the lending-desk business logic, free of any HTTP
//! concern. `Ledger` owns the state; each sibling module contributes the
//! operations for one concern. Handlers in `api` call these directly.

pub mod book_service;
pub mod ledger;
pub mod loan_service;
pub mod member_service;
pub mod query_service;
pub mod report_service;
pub mod request_service;

// Re-export for convenience
pub use ledger::{Ledger, LedgerPolicy};
pub use query_service::LibraryStats;
pub use report_service::{render_report, report_file_name};
