//! Navigation-time login check for the protected route group
//!
//! The credential is read once when a protected route is entered. Later
//! credential changes do not re-run the check for a page already shown.

use crate::credential::Credential;
use crate::navigation::LOGIN_ROUTE;

/// Session state as seen by the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

impl AuthState {
    pub fn of(credential: &Credential) -> Self {
        if credential.is_complete() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }
}

/// What the router should do with the navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the requested page
    Proceed,
    /// Abort rendering and temporarily redirect
    Redirect(&'static str),
}

/// Decide whether a protected route may render
pub fn guard(credential: &Credential) -> GuardOutcome {
    match AuthState::of(credential) {
        AuthState::Authenticated => GuardOutcome::Proceed,
        AuthState::Unauthenticated => {
            log::info!("No credentials, redirecting to login page");
            GuardOutcome::Redirect(LOGIN_ROUTE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_redirects_without_credential() {
        assert_eq!(guard(&Credential::default()), GuardOutcome::Redirect("/login"));

        let partial = Credential { username: Some("user".to_string()), password: None };
        assert_eq!(AuthState::of(&partial), AuthState::Unauthenticated);
        assert_eq!(guard(&partial), GuardOutcome::Redirect(LOGIN_ROUTE));
    }

    #[test]
    fn test_guard_proceeds_with_credential() {
        let credential = Credential::new("user", "pass");
        assert_eq!(AuthState::of(&credential), AuthState::Authenticated);
        assert_eq!(guard(&credential), GuardOutcome::Proceed);
    }
}
