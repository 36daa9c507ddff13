use crate::config::Config;
use std::collections::HashMap;

fn config_from(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    Config::from_vars(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[]);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.currency, "USD");
    assert!(config.simplify_debts);
}

#[test]
fn test_values_from_environment() {
    let config = config_from(&[
        ("LOG_LEVEL", "debug"),
        ("SETTLEUP_CURRENCY", " eur "),
        ("SETTLEUP_SIMPLIFY", "false"),
    ]);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.currency, "EUR");
    assert!(!config.simplify_debts);
}

#[test]
fn test_unusable_values_fall_back() {
    let config = config_from(&[("SETTLEUP_CURRENCY", "  "), ("SETTLEUP_SIMPLIFY", "nope")]);
    assert_eq!(config.currency, "USD");
    assert!(config.simplify_debts);
}
