use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// User-configurable engine preferences and storage roots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Trailing days used to estimate forecast daily rates.
    #[serde(default = "Config::default_lookback_days")]
    pub forecast_lookback_days: u32,
    /// Days projected forward by the forecaster.
    #[serde(default = "Config::default_horizon_days")]
    pub forecast_horizon_days: u32,
    /// Completed months inspected by the suggested income projection.
    #[serde(default = "Config::default_trailing_income_months")]
    pub trailing_income_months: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for ledgers. Defaults to `~/Documents/Fincast`.
    pub default_ledger_root: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for backups. Defaults to `~/Documents/Fincast/backups`.
    pub default_backup_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            forecast_lookback_days: Self::default_lookback_days(),
            forecast_horizon_days: Self::default_horizon_days(),
            trailing_income_months: Self::default_trailing_income_months(),
            default_ledger_root: None,
            default_backup_root: None,
        }
    }
}

impl Config {
    pub fn default_lookback_days() -> u32 {
        30
    }

    pub fn default_horizon_days() -> u32 {
        90
    }

    pub fn default_trailing_income_months() -> u32 {
        3
    }

    pub fn resolve_default_ledger_root(&self) -> PathBuf {
        if let Some(path) = &self.default_ledger_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Fincast")
    }

    pub fn resolve_default_backup_root(&self) -> PathBuf {
        if let Some(path) = &self.default_backup_root {
            return path.clone();
        }

        self.resolve_default_ledger_root().join("backups")
    }
}
