//! Auth routes - Login form, login and logout
//!
//! These routes are public; everything else goes through the credential guard.

pub mod api;
pub mod page;

pub use api::{api_login, api_logout};
pub use page::page_login;
