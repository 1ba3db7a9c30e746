//! Server settings and the assembled configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_LOGIN_PATH, RouteGate};
use crate::inbound::http::session_config::SessionSettings;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Listener and routing settings loaded via OrthoConfig.
///
/// Read from `PRUNK_*` environment variables, configuration files, and
/// command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PRUNK")]
pub struct ServerSettings {
    /// Socket address to bind, e.g. `127.0.0.1:8080`.
    pub bind_addr: Option<String>,
    /// Path unauthenticated visitors are redirected to.
    pub login_path: Option<String>,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`std::net::AddrParseError`] when the configured value is not a
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    /// Return the configured login path, falling back to `/login`.
    pub fn login_path(&self) -> &str {
        self.login_path.as_deref().unwrap_or(DEFAULT_LOGIN_PATH)
    }

    /// Gate redirecting to the configured login path.
    pub fn route_gate(&self) -> RouteGate {
        RouteGate::with_login_path(self.login_path())
    }
}

/// Everything [`create_server`](super::create_server) needs to start.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) gate: RouteGate,
}

impl ServerConfig {
    /// Construct a configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            key: session.key,
            cookie_secure: session.cookie_secure,
            same_site: session.same_site,
            bind_addr,
            gate: RouteGate::default(),
        }
    }

    /// Use `gate` for every protected route.
    #[must_use]
    pub fn with_gate(mut self, gate: RouteGate) -> Self {
        self.gate = gate;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
