//! Typed application errors and an authentication gate for protected routes.
//!
//! [`domain`] holds the framework-free pieces: the [`Error`] carried through
//! `Result` chains and the [`RouteGate`] deciding whether a protected view may
//! render. [`inbound::http`] wires both into Actix middleware.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::{Error, RouteGate, TraceId};
pub use middleware::Trace;
