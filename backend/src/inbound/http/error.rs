//! HTTP adapter mapping for domain errors.
//!
//! Purpose: render [`Error`] as a JSON envelope whose status is the error's
//! own status code, and collapse every other failure into the generic
//! internal error.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use tracing::{error, warn};

use crate::domain::{Error, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

/// Resolve the response status for an error.
///
/// Codes outside `100..=599` cannot be written to the wire and fall back to
/// 500.
pub(crate) fn status_for(error: &Error) -> StatusCode {
    let raw = error.status_code();
    match StatusCode::from_u16(raw) {
        Ok(status) if (100..=599).contains(&raw) => status,
        _ => {
            warn!(
                status_code = raw,
                message = error.message(),
                "error carries an unusable status code"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// `Error::status_code` (the raw `u16`) shadows this method under normal
// method resolution; call `ResponseError::status_code` or `status_for`.
impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = status_for(self);
        if status.is_server_error() {
            error!(status = status.as_u16(), message = self.message(), "request failed");
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(self)
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        if let Some(typed) = err.as_error::<Error>() {
            return typed.clone();
        }
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to internal error");
        Error::internal(err.to_string())
    }
}

/// JSON extractor settings whose rejections surface as typed `400` errors.
///
/// Without this, body rejections reach [`ErrorBoundary`] as foreign failures
/// and are rendered as internal errors.
///
/// [`ErrorBoundary`]: super::boundary::ErrorBoundary
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    })
}

/// Form extractor settings whose rejections surface as typed `400` errors.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid form body: {err}")).into()
    })
}
