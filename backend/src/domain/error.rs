//! Structured domain error carried across service and transport boundaries.
//!
//! Every failure surfaced by the domain is an [`Error`] with a machine-readable
//! [`ErrorCode`], a human-readable message, the trace identifier active when the
//! error was created, and optional structured details. The HTTP layer maps the
//! code onto a status and serialises the error as the response body.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::trace_id::TraceId;

/// Machine-readable error categories understood by API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request was malformed or failed validation.
    InvalidRequest,
    /// The referenced resource does not exist.
    NotFound,
    /// The request conflicts with the current state of a resource.
    Conflict,
    /// A downstream dependency is temporarily unavailable.
    ServiceUnavailable,
    /// An unexpected internal failure occurred.
    InternalError,
}

/// Structured error payload returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    /// Machine-readable error category.
    pub code: ErrorCode,
    /// Human-readable description of the failure.
    pub message: String,
    /// Trace identifier correlating the error with request logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = Uuid)]
    pub trace_id: Option<String>,
    /// Optional structured context such as offending field names.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl Error {
    /// Create an error with the supplied code and message, capturing the
    /// current trace identifier when one is in scope.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Build an [`ErrorCode::InvalidRequest`] error.
    #[must_use]
    #[rustfmt::skip]
    pub fn invalid_request(message: impl Into<String>) -> Self { Self::new(ErrorCode::InvalidRequest, message) }

    /// Build an [`ErrorCode::NotFound`] error.
    #[must_use]
    #[rustfmt::skip]
    pub fn not_found(message: impl Into<String>) -> Self { Self::new(ErrorCode::NotFound, message) }

    /// Build an [`ErrorCode::Conflict`] error.
    #[must_use]
    #[rustfmt::skip]
    pub fn conflict(message: impl Into<String>) -> Self { Self::new(ErrorCode::Conflict, message) }

    /// Build an [`ErrorCode::ServiceUnavailable`] error.
    #[must_use]
    #[rustfmt::skip]
    pub fn service_unavailable(message: impl Into<String>) -> Self { Self::new(ErrorCode::ServiceUnavailable, message) }

    /// Build an [`ErrorCode::InternalError`] error.
    #[must_use]
    #[rustfmt::skip]
    pub fn internal(message: impl Into<String>) -> Self { Self::new(ErrorCode::InternalError, message) }

    /// Attach structured details to the error.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Override the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn constructors_set_expected_codes() {
        assert_eq!(Error::invalid_request("x").code, ErrorCode::InvalidRequest);
        assert_eq!(Error::not_found("x").code, ErrorCode::NotFound);
        assert_eq!(Error::conflict("x").code, ErrorCode::Conflict);
        assert_eq!(
            Error::service_unavailable("x").code,
            ErrorCode::ServiceUnavailable
        );
        assert_eq!(Error::internal("x").code, ErrorCode::InternalError);
    }

    #[test]
    fn with_details_round_trips_json() {
        let err = Error::invalid_request("bad field").with_details(json!({"field": "numWeek"}));
        let value = serde_json::to_value(&err).expect("serialise error");
        assert_eq!(value["code"], "invalid_request");
        assert_eq!(value["message"], "bad field");
        assert_eq!(value["details"]["field"], "numWeek");
    }

    #[test]
    fn absent_optional_fields_are_omitted() {
        let err = Error::not_found("missing");
        let value = serde_json::to_value(&err).expect("serialise error");
        assert!(value.get("traceId").is_none());
        assert!(value.get("details").is_none());
    }

    #[test]
    fn the_trace_id_serialises_in_camel_case() {
        let err = Error::not_found("missing").with_trace_id("abc");
        let value = serde_json::to_value(&err).expect("serialise error");
        assert_eq!(value["traceId"], "abc");
    }

    #[tokio::test]
    async fn new_captures_scoped_trace_id() {
        let trace_id: TraceId = "11111111-2222-3333-4444-555555555555"
            .parse()
            .expect("valid UUID");
        let err = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;
        assert_eq!(err.trace_id, Some(trace_id.to_string()));
    }
}
