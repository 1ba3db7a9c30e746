//! HTTP inbound adapter: handlers, middleware, and session plumbing.

pub mod boundary;
pub mod error;
pub mod health;
pub mod protected;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod views;

pub use boundary::ErrorBoundary;
pub use error::ApiResult;
pub use protected::ProtectedRoute;
