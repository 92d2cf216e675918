//! In-memory credential store
//!
//! Credentials live only in process memory and are lost on restart. The
//! Basic-Auth value is derived on demand from the current state.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::navigation::{Navigator, LOGIN_ROUTE};
use crate::store::{SubscriptionId, Writable};

/// Username/password pair. An empty string counts as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    fn present(field: &Option<String>) -> Option<&str> {
        field.as_deref().filter(|value| !value.is_empty())
    }

    /// Both fields present
    pub fn is_complete(&self) -> bool {
        Self::present(&self.username).is_some() && Self::present(&self.password).is_some()
    }

    /// Base64 of `username:password`, or an empty string when either is missing
    pub fn basic_auth(&self) -> String {
        match (Self::present(&self.username), Self::present(&self.password)) {
            (Some(username), Some(password)) => STANDARD.encode(format!("{}:{}", username, password)),
            _ => String::new(),
        }
    }
}

/// Reactive credential state
#[derive(Debug, Default)]
pub struct CredentialStore {
    state: Writable<Credential>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored credential. No validation takes place.
    pub fn set_credential(&self, username: impl Into<String>, password: impl Into<String>) {
        let credential = Credential::new(username, password);
        log::info!(
            "Credential set for user '{}'",
            credential.username.as_deref().unwrap_or_default()
        );
        self.state.set(credential);
    }

    /// Current credential
    pub fn get(&self) -> Credential {
        self.state.get()
    }

    pub fn basic_auth(&self) -> String {
        self.state.get().basic_auth()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.get().is_complete()
    }

    /// Clear the credential, then ask `navigator` for the login page.
    pub fn logout(&self, navigator: &dyn Navigator) {
        self.state.set(Credential::default());
        log::info!("Logged out");
        navigator.goto(LOGIN_ROUTE);
    }

    /// Observe credential changes. Called once immediately with the current value.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Credential) + Send + Sync + 'static,
    {
        self.state.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavigationLog;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_basic_auth_empty_when_incomplete() {
        assert_eq!(Credential::default().basic_auth(), "");

        let only_user = Credential { username: Some("user".to_string()), password: None };
        assert_eq!(only_user.basic_auth(), "");

        let only_password = Credential { username: None, password: Some("pass".to_string()) };
        assert_eq!(only_password.basic_auth(), "");

        let empty_password = Credential::new("user", "");
        assert_eq!(empty_password.basic_auth(), "");
        assert!(!empty_password.is_complete());
    }

    #[test]
    fn test_basic_auth_encodes_pair() {
        let credential = Credential::new("user", "pass");
        assert_eq!(credential.basic_auth(), "dXNlcjpwYXNz");
    }

    #[test]
    fn test_debug_redacts_password() {
        let output = format!("{:?}", Credential::new("travis", "hunter2"));
        assert!(output.contains("travis"));
        assert!(!output.contains("hunter2"));
    }

    #[test]
    fn test_set_credential_notifies_subscribers() {
        let store = CredentialStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        store.subscribe(move |credential: &Credential| s.lock().unwrap().push(credential.basic_auth()));

        store.set_credential("user", "pass");
        assert!(store.is_authenticated());
        assert_eq!(store.basic_auth(), "dXNlcjpwYXNz");
        assert_eq!(*seen.lock().unwrap(), vec!["".to_string(), "dXNlcjpwYXNz".to_string()]);
    }

    #[test]
    fn test_logout_clears_then_navigates_once() {
        let store = Arc::new(CredentialStore::new());
        store.set_credential("user", "pass");

        let navigator = NavigationLog::new();
        store.logout(&navigator);

        assert_eq!(store.get(), Credential::default());
        assert!(!store.is_authenticated());
        assert_eq!(navigator.requests(), vec![LOGIN_ROUTE.to_string()]);
    }

    struct CheckingNavigator {
        store: Arc<CredentialStore>,
        cleared_before_goto: Mutex<Option<bool>>,
    }

    impl Navigator for CheckingNavigator {
        fn goto(&self, _path: &str) {
            *self.cleared_before_goto.lock().unwrap() = Some(!self.store.is_authenticated());
        }
    }

    #[test]
    fn test_logout_clears_before_navigation() {
        let store = Arc::new(CredentialStore::new());
        store.set_credential("user", "pass");
        let navigator = CheckingNavigator {
            store: Arc::clone(&store),
            cleared_before_goto: Mutex::new(None),
        };

        store.logout(&navigator);
        assert_eq!(*navigator.cleared_before_goto.lock().unwrap(), Some(true));
    }
}
