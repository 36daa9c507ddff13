use crate::constants::DEFAULT_CURRENCY;
use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    /// Display-only currency code for groups that do not name one.
    pub currency: String,
    /// Whether `debts` simplifies or lists raw pairwise obligations.
    pub simplify_debts: bool,
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            currency: var("SETTLEUP_CURRENCY")
                .map(|code| code.trim().to_ascii_uppercase())
                .filter(|code| !code.is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            simplify_debts: var("SETTLEUP_SIMPLIFY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
