//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of utoipa derives; these wrappers mirror their
//! serialised shape in the adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Category derived from the error's status code.
#[derive(ToSchema)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
    #[schema(rename = "other")]
    Other,
}

/// OpenAPI schema for the serialised [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorEnvelope {
    /// Category derived from `statusCode`.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message. Internal errors render a fixed placeholder.
    #[schema(example = "Not found")]
    message: String,
    /// Status code supplied when the error was raised.
    #[schema(example = 404)]
    status_code: u16,
    /// Correlation identifier, mirrored in the `trace-id` header.
    #[schema(example = "00000000-0000-0000-0000-000000000000")]
    trace_id: Option<String>,
    /// Supplementary error details.
    details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn envelope_fields_are_camel_case() {
        let schema_json = schema_to_json::<ErrorEnvelope>();
        for field in ["\"code\"", "\"message\"", "\"statusCode\"", "\"traceId\"", "\"details\""] {
            assert!(schema_json.contains(field), "missing {field}");
        }
        assert!(!schema_json.contains("status_code"));
    }

    #[test]
    fn error_code_schema_lists_every_category() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
            "other",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }
}
