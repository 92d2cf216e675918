//! Route modules for the front end
//!
//! - auth: Login form, login and logout (public)
//! - filters: Date range, owner filter and refresh broadcast
//! - transactions: Transaction list and totals from the backend
//! - settings: Configuration display
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints and form posts
//! - page.rs: HTMX page and fragment rendering

pub mod auth;
pub mod filters;
pub mod settings;
pub mod transactions;
