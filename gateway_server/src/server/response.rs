use axum::{
    Json,
    extract::rejection::{BytesRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_stack::{Report, report};
use gateway_models::models::api_response::ApiErrorResponse;
use tracing::{error, warn};

use crate::error::{Error, ReportDisplayExt};

/// Handler error, rendered as the `{success: false, error, details?}` envelope.
#[derive(Debug)]
pub struct ApiError(pub Report<Error>);

impl From<Report<Error>> for ApiError {
    fn from(report: Report<Error>) -> Self {
        Self(report)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        let context = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Error::PayloadTooLarge
        } else {
            Error::InvalidArgument("Invalid request body".to_string())
        };
        Self(report!(context).attach_printable(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(
            report!(Error::InvalidArgument("Invalid query string".to_string()))
                .attach_printable(rejection.body_text()),
        )
    }
}

impl ApiError {
    fn details(&self) -> Option<String> {
        let context = self.0.current_context();
        if let Some(body) = context.upstream_body() {
            return Some(body.to_string());
        }
        // Internal failures are logged, not echoed
        if context.status_code() == 500 {
            return None;
        }
        Some(self.0.format())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let context = self.0.current_context();
        let status =
            StatusCode::from_u16(context.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!("Request failed with {status}: {:?}", self.0);
        } else {
            warn!("Request rejected with {status}: {}", self.0.format());
        }

        let body = ApiErrorResponse::new(context.to_string(), self.details());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_body_becomes_details() {
        let error = ApiError(report!(Error::QuoteServiceFailed {
            status: 503,
            body: r#"{"error":"Service Unavailable"}"#.to_string(),
        }));
        assert_eq!(
            error.details().as_deref(),
            Some(r#"{"error":"Service Unavailable"}"#)
        );
        assert_eq!(error.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_configuration_error_hides_details() {
        let error = ApiError(
            report!(Error::ConfigurationMissing("GLUEX_API_KEY")).attach_printable("secret"),
        );
        assert_eq!(error.details(), None);
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_argument_has_no_empty_details() {
        let error = ApiError(report!(Error::InvalidArgument(
            "Invalid inputToken address provided.".to_string()
        )));
        // No attachments, so the envelope omits `details`
        let body = ApiErrorResponse::new(
            error.0.current_context().to_string(),
            error.details(),
        );
        assert_eq!(body.details, None);
        assert_eq!(body.error, "Invalid inputToken address provided.");
    }
}
