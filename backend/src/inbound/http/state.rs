//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend on
//! domain ports only and remain testable without I/O.

use std::sync::Arc;

use crate::domain::RouteGate;
use crate::domain::ports::{Authenticator, FixtureAuthenticator};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential check used by the login handler.
    pub authenticator: Arc<dyn Authenticator>,
    /// Gate shared with protected scopes; handlers read its login path.
    pub gate: RouteGate,
}

impl HttpState {
    /// Build state from explicit collaborators.
    pub fn new(authenticator: Arc<dyn Authenticator>, gate: RouteGate) -> Self {
        Self {
            authenticator,
            gate,
        }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureAuthenticator), RouteGate::default())
    }
}
