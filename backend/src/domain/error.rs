//! Domain-level error type carrying a status code.
//!
//! The error is transport agnostic: it stores the numeric status a failure
//! should surface as, but never touches HTTP types. Inbound adapters read
//! [`Error::status_code`] and [`Error::message`] to build their responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use super::TraceId;

/// Message rendered in place of redacted internal failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Stable machine-readable category derived from a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with current state.
    Conflict,
    /// A dependency is temporarily unable to answer.
    ServiceUnavailable,
    /// An unexpected error occurred inside the application.
    InternalError,
    /// Any status without a dedicated category.
    Other,
}

impl ErrorCode {
    /// Categorise a numeric status code.
    ///
    /// # Examples
    /// ```
    /// use prunk::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::from_status(404), ErrorCode::NotFound);
    /// assert_eq!(ErrorCode::from_status(418), ErrorCode::Other);
    /// ```
    #[must_use]
    pub fn from_status(status_code: u16) -> Self {
        match status_code {
            400 => Self::InvalidRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            500 => Self::InternalError,
            503 => Self::ServiceUnavailable,
            _ => Self::Other,
        }
    }
}

/// Application failure pairing a message with a status code.
///
/// ## Invariants
/// - `status_code` is fixed at construction; there is no setter.
/// - Construction never fails and performs no range check. Callers supply a
///   meaningful HTTP status; adapters fall back to 500 for codes outside
///   `100..=599`.
///
/// # Examples
/// ```
/// use prunk::domain::Error;
///
/// let err = Error::new("Not found", 404);
/// assert_eq!(err.message(), "Not found");
/// assert_eq!(err.status_code(), 404);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ErrorDto", from = "ErrorDto")]
pub struct Error {
    message: String,
    status_code: u16,
    trace_id: Option<String>,
    details: Option<Value>,
    redacted: bool,
}

impl Error {
    /// Create a new error.
    ///
    /// Captures the current trace identifier if one is in scope so the error
    /// payload is correlated automatically.
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
            redacted: false,
        }
    }

    /// Human-readable message supplied at construction.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Numeric status supplied at construction.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Category derived from [`Self::status_code`].
    pub fn code(&self) -> ErrorCode {
        ErrorCode::from_status(self.status_code)
    }

    /// Trace identifier captured at construction or attached later.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Whether adapters must hide the message and details from clients.
    pub fn is_redacted(&self) -> bool {
        self.redacted
    }

    /// Attach a trace identifier to the error.
    ///
    /// # Examples
    /// ```
    /// use prunk::domain::Error;
    ///
    /// let err = Error::forbidden("nope").with_trace_id("abc");
    /// assert_eq!(err.trace_id(), Some("abc"));
    /// ```
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use prunk::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad")
    ///     .with_details(json!({ "field": "name" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for 400 Bad Request.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(message, 400)
    }

    /// Convenience constructor for 401 Unauthorized.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message, 401)
    }

    /// Convenience constructor for 403 Forbidden.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(message, 403)
    }

    /// Convenience constructor for 404 Not Found.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, 404)
    }

    /// Convenience constructor for 409 Conflict.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(message, 409)
    }

    /// Convenience constructor for 503 Service Unavailable.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(message, 503)
    }

    /// Internal failure whose message stays server-side.
    ///
    /// The message is kept for logs and [`Self::message`], but adapters
    /// render [`INTERNAL_ERROR_MESSAGE`] instead.
    pub fn internal(message: impl Into<String>) -> Self {
        let mut error = Self::new(message, 500);
        error.redacted = true;
        error
    }

    /// Classify an arbitrary failure at an error boundary.
    ///
    /// Walks the `source()` chain looking for a typed [`Error`]; the first one
    /// found is returned unchanged. Anything else is opaque, so it is logged
    /// and mapped to a redacted internal error.
    ///
    /// # Examples
    /// ```
    /// use prunk::domain::Error;
    ///
    /// let typed = Error::not_found("missing");
    /// assert_eq!(Error::recognise(&typed), typed);
    ///
    /// let io = std::io::Error::other("disk on fire");
    /// assert_eq!(Error::recognise(&io).status_code(), 500);
    /// ```
    pub fn recognise(failure: &(dyn std::error::Error + 'static)) -> Self {
        let mut current = Some(failure);
        while let Some(candidate) = current {
            if let Some(typed) = candidate.downcast_ref::<Self>() {
                return typed.clone();
            }
            current = candidate.source();
        }

        error!(error = %failure, "unrecognised failure mapped to internal error");
        Self::internal(failure.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

/// Serialised envelope.
///
/// `code` is derived on the way out and ignored on the way in, so decoding an
/// envelope always reproduces the same status-to-category mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    #[serde(skip_deserializing, default = "ErrorDto::undecoded_code")]
    code: ErrorCode,
    message: String,
    status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ErrorDto {
    const fn undecoded_code() -> ErrorCode {
        ErrorCode::Other
    }
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        if value.redacted {
            return Self {
                code: ErrorCode::from_status(value.status_code),
                message: INTERNAL_ERROR_MESSAGE.to_owned(),
                status_code: value.status_code,
                trace_id: value.trace_id,
                details: None,
            };
        }
        Self {
            code: ErrorCode::from_status(value.status_code),
            message: value.message,
            status_code: value.status_code,
            trace_id: value.trace_id,
            details: value.details,
        }
    }
}

impl From<ErrorDto> for Error {
    fn from(value: ErrorDto) -> Self {
        let ErrorDto {
            code: _,
            message,
            status_code,
            trace_id,
            details,
        } = value;
        Self {
            message,
            status_code,
            trace_id,
            details,
            redacted: false,
        }
    }
}
