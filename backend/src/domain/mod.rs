//! Domain primitives.
//!
//! Purpose: keep failure signalling and access decisions free of HTTP types.
//! Inbound adapters translate these into responses.
//!
//! Public surface:
//! - Error / ErrorCode: status-carrying application failure.
//! - RouteGate / GateOutcome / AuthState: access decision for protected views.
//! - TraceId: request correlation identifier.
//! - UserId / LoginCredentials: session identity and login payload.

pub mod auth;
pub mod error;
pub mod gate;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, INTERNAL_ERROR_MESSAGE};
pub use self::gate::{AuthState, DEFAULT_LOGIN_PATH, GateOutcome, Navigation, RouteGate};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserValidationError};

/// Convenient result alias for fallible application logic.
///
/// # Examples
/// ```
/// use prunk::domain::{ApiResult, Error};
///
/// fn load() -> ApiResult<u32> {
///     Err(Error::forbidden("nope"))
/// }
/// assert_eq!(load().unwrap_err().status_code(), 403);
/// ```
pub type ApiResult<T> = Result<T, Error>;
