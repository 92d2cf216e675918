//! Navigation targets and the hook stores use to request a page change

use std::sync::{Mutex, PoisonError};

/// Login page
pub const LOGIN_ROUTE: &str = "/login";
/// Landing page after a successful login
pub const HOME_ROUTE: &str = "/";

/// Something able to move the user to another page.
///
/// Requests are fire-and-forget: callers never wait for the page change.
pub trait Navigator {
    fn goto(&self, path: &str);
}

/// Navigator that records every request in order.
///
/// HTTP handlers use it to turn a request into a redirect response once the
/// store operation has finished.
#[derive(Debug, Default)]
pub struct NavigationLog {
    requests: Mutex<Vec<String>>,
}

impl NavigationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requested paths, oldest first
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Most recent request
    pub fn last(&self) -> Option<String> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

impl Navigator for NavigationLog {
    fn goto(&self, path: &str) {
        log::debug!("Navigation requested: {}", path);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}
