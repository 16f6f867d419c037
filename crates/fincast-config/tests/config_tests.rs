use fincast_config::{Config, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_has_sensible_knobs() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
    assert_eq!(cfg.forecast_lookback_days, 30);
    assert_eq!(cfg.forecast_horizon_days, 90);
    assert_eq!(cfg.trailing_income_months, 3);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.currency = "EUR".to_string();
    cfg.forecast_lookback_days = 60;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.currency, "EUR");
    assert_eq!(loaded.forecast_lookback_days, 60);
    assert_eq!(loaded.forecast_horizon_days, 90);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("absent.json"));
    let loaded = manager.load().expect("defaults");
    assert_eq!(loaded.currency, Config::default().currency);
}

#[test]
fn older_configs_gain_new_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"locale":"en-GB","currency":"GBP"}"#).unwrap();

    let loaded = ConfigManager::new(path).load().expect("load partial");
    assert_eq!(loaded.currency, "GBP");
    assert_eq!(loaded.forecast_lookback_days, 30);
}
