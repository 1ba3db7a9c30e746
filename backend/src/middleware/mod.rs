//! Request middleware.
//!
//! Cross-cutting request lifecycle concerns. Access control middleware lives
//! with the HTTP adapter in [`crate::inbound::http::protected`].

pub mod trace;

pub use trace::Trace;
