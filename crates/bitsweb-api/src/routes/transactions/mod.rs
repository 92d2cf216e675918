//! Transaction routes - List and totals for the current window
//!
//! Transactions come from the backend for the current date range and are
//! then narrowed to the selected owner.
//!
//! Structure:
//! - api.rs: JSON API and the shared loader
//! - page.rs: Full page and HTMX fragments

pub mod api;
pub mod page;

pub use api::api_transactions;
pub use page::{htmx_transactions_list, htmx_transactions_summary, page_transactions};
