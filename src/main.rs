use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lending_desk::infrastructure::{AppState, Config, seed, server};
use lending_desk::{Ledger, SystemClock};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lending_desk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    tracing::info!(
        "Policy: fines_enabled={}, enforce_borrow_limit={}",
        config.fines_enabled,
        config.enforce_borrow_limit
    );

    let mut ledger = Ledger::new(config.ledger_policy(), Arc::new(SystemClock));

    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        if let Err(e) = seed::seed_demo_data(&mut ledger) {
            tracing::error!("Failed to seed data: {}", e);
        }
    }

    let state = AppState::new(ledger);
    if let Err(e) = server::serve(&config, state).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
