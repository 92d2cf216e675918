//! Client-side state for bitsweb
//!
//! Everything here lives in process memory:
//! - credential: username/password and the derived Basic-Auth value
//! - date_range: reporting window and the refresh broadcast
//! - owner: whose transactions are shown
//! - guard: login check run when a protected route is entered
//! - format: date and currency presentation

pub mod credential;
pub mod date_range;
pub mod error;
pub mod format;
pub mod guard;
pub mod models;
pub mod navigation;
pub mod owner;
pub mod store;

use bitsweb_config::Config;
use chrono::{Local, NaiveDate};

pub use credential::{Credential, CredentialStore};
pub use date_range::{DateRange, DateRangeStore};
pub use error::{CoreError, CoreResult};
pub use format::{format_currency, format_date, format_month, format_number};
pub use guard::{guard, AuthState, GuardOutcome};
pub use models::{
    filter_transactions, GasTransaction, Transaction, TransactionRecord, TransactionSummary, TransactionType,
};
pub use navigation::{NavigationLog, Navigator, HOME_ROUTE, LOGIN_ROUTE};
pub use owner::Owner;
pub use store::{Emitter, SubscriptionId, Writable};

/// All state of one running front end, shared by every request
#[derive(Debug)]
pub struct AppContext {
    pub credential: CredentialStore,
    pub date_range: DateRangeStore,
    pub owner: Writable<Owner>,
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(Local::now().date_naive(), date_range::DEFAULT_MONTHS_BACK)
    }
}

impl AppContext {
    /// Fresh state with the default window ending `today`
    pub fn new(today: NaiveDate, months_back: u32) -> Self {
        Self {
            credential: CredentialStore::new(),
            date_range: DateRangeStore::new(today, months_back),
            owner: Writable::new(Owner::default()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Local::now().date_naive(), config.date_range.months_back)
    }
}

// ==================== Tests ====================
