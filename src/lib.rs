#![doc(test(attr(deny(warnings))))]

//! Fincast is the forecasting and budgeting core behind a personal-finance
//! dashboard: category aggregation, income projection, budget pacing, and
//! cash-flow forecasting over ledger snapshots.

pub mod api;
pub mod utils;

pub use fincast_config as config;
pub use fincast_core::*;
pub use fincast_domain::*;
pub use fincast_storage_json as storage_json;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fincast tracing initialized.");
    });
}
