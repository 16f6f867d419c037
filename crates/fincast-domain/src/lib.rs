//! fincast-domain
//!
//! Pure domain models (Ledger, Account, Category, Transaction, Budget, Goal, etc.).
//! No I/O, no services. Only data types, calendar primitives, and money helpers.

pub mod account;
pub mod category;
pub mod common;
pub mod goal;
pub mod ledger;
pub mod transaction;

pub use account::*;
pub use category::*;
pub use common::*;
pub use goal::*;
pub use ledger::*;
pub use transaction::*;
