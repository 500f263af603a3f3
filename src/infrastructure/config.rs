use std::env;

use crate::services::LedgerPolicy;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub fines_enabled: bool,
    pub enforce_borrow_limit: bool,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(Vec::new),
            fines_enabled: flag("FINES_ENABLED", true),
            enforce_borrow_limit: flag("ENFORCE_BORROW_LIMIT", true),
            seed_demo: env::var("SEED_DEMO").is_ok(),
        }
    }

    pub fn ledger_policy(&self) -> LedgerPolicy {
        LedgerPolicy {
            fines_enabled: self.fines_enabled,
            enforce_borrow_limit: self.enforce_borrow_limit,
        }
    }
}

fn flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| parse_flag(&v))
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> bool {
    let v = value.trim();
    v != "false" && v != "0"
}
