//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no Axum, no Tokio).
//! Only the error taxonomy and the clock seam the ledger reads dates from.

pub mod clock;
pub mod errors;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::DomainError;
