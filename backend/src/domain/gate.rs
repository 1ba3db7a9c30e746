//! Access gate for protected views.
//!
//! [`RouteGate::evaluate`] decides between rendering protected content and
//! redirecting to the login view. The protected content is passed as a
//! closure and only invoked once the gate has decided to render it, so an
//! unauthenticated evaluation never builds the protected output at all.
//!
//! The gate takes its authentication signal as an argument and keeps no
//! state between evaluations.

use super::ports::AuthSignal;

/// Login view path used when none is configured.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Authentication state reported by an [`AuthSignal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthState {
    /// The current user is authenticated.
    Authenticated,
    /// The current user is not authenticated.
    Unauthenticated,
    /// The provider is loading or failed; neither answer can be assumed.
    Pending,
}

impl From<bool> for AuthState {
    fn from(value: bool) -> Self {
        if value {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }
}

/// Navigation instruction emitted when access is denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    to: String,
    replace: bool,
}

impl Navigation {
    /// Navigate to `to`, replacing the current history entry.
    pub fn replace(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            replace: true,
        }
    }

    /// Target path.
    pub fn to(&self) -> &str {
        self.to.as_str()
    }

    /// Whether the navigation replaces the current history entry.
    pub fn replaces_history(&self) -> bool {
        self.replace
    }
}

/// Result of a single gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome<C> {
    /// Access denied; navigate to the login view.
    Redirect(Navigation),
    /// Access granted; carries the rendered protected content.
    Authorized(C),
    /// The signal could not decide; nothing was rendered.
    Pending,
}

impl<C> GateOutcome<C> {
    /// Whether this outcome redirects.
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }

    /// Redirect instruction, if any.
    pub fn navigation(&self) -> Option<&Navigation> {
        match self {
            Self::Redirect(navigation) => Some(navigation),
            Self::Authorized(_) | Self::Pending => None,
        }
    }

    /// Rendered content, if access was granted.
    pub fn into_authorized(self) -> Option<C> {
        match self {
            Self::Authorized(content) => Some(content),
            Self::Redirect(_) | Self::Pending => None,
        }
    }
}

/// Stateless guard redirecting unauthenticated users to a login view.
///
/// # Examples
/// ```
/// use prunk::domain::{GateOutcome, RouteGate};
///
/// let gate = RouteGate::default();
///
/// let denied = gate.evaluate(&false, || "Dashboard");
/// let navigation = denied.navigation().expect("redirects");
/// assert_eq!(navigation.to(), "/login");
/// assert!(navigation.replaces_history());
///
/// let granted = gate.evaluate(&true, || "Dashboard");
/// assert_eq!(granted, GateOutcome::Authorized("Dashboard"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGate {
    login_path: String,
}

impl Default for RouteGate {
    fn default() -> Self {
        Self::with_login_path(DEFAULT_LOGIN_PATH)
    }
}

impl RouteGate {
    /// Build a gate redirecting to `login_path`.
    pub fn with_login_path(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }

    /// Path unauthenticated users are sent to.
    pub fn login_path(&self) -> &str {
        self.login_path.as_str()
    }

    /// Evaluate the gate once.
    ///
    /// Reads `signal` exactly once. `children` runs only when the signal
    /// reports [`AuthState::Authenticated`].
    pub fn evaluate<S, C, F>(&self, signal: &S, children: F) -> GateOutcome<C>
    where
        S: AuthSignal + ?Sized,
        F: FnOnce() -> C,
    {
        match signal.auth_state() {
            AuthState::Authenticated => GateOutcome::Authorized(children()),
            AuthState::Unauthenticated => {
                GateOutcome::Redirect(Navigation::replace(self.login_path.clone()))
            }
            AuthState::Pending => GateOutcome::Pending,
        }
    }
}
