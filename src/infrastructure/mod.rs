//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Configuration loading (config)
//! - HTTP server setup (server)
//! - Demo data (seed)
//! - Application state (state)

pub mod config;
pub mod seed;
pub mod server;
pub mod state;

pub use config::Config;
pub use state::AppState;
