//! # Response Envelope & Error Contract
//!
//! Every endpoint answers with an [`ApiResponse<T>`]. Success payloads are
//! flattened next to a `success` flag; failures carry a structured error:
//!
//! ```json
//! { "success": true, "foods": [ ... ], "total_nutrition": { ... } }
//! { "success": false, "error": { "code": "invalid_request", "message": "..." } }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::NutriError;

/// Machine-readable error code included in every error response.
///
/// Serialized as a snake_case string on the wire (e.g. `"invalid_request"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed request, bad upload or failed validation. HTTP 400.
    InvalidRequest,
    /// HTTP 404.
    NotFound,
    /// Unexpected server-side failure; details are only logged. HTTP 500.
    InternalError,
    /// The recognition backend answered with an error or timed out. HTTP 502.
    UpstreamError,
    /// The recognition backend is not configured. HTTP 503.
    ServiceUnavailable,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UpstreamError => StatusCode::BAD_GATEWAY,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::NotFound => write!(f, "not_found"),
            Self::InternalError => write!(f, "internal_error"),
            Self::UpstreamError => write!(f, "upstream_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
        }
    }
}

/// Structured error payload within the envelope.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    pub code: ErrorCode,
    /// Human-readable description safe to show to end users.
    pub message: String,
}

/// Error body as it appears on the wire, for the OpenAPI document.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Always `false`
    pub success: bool,
    pub error: ApiError,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    /// Payload fields, flattened into the top-level object.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success response (HTTP 200). `data` must serialize as a JSON object.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            status: StatusCode::OK,
        }
    }

    /// Error response. HTTP status is derived from the [`ErrorCode`].
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            status,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response");
                let body = serde_json::json!({
                    "success": false,
                    "error": {
                        "code": "internal_error",
                        "message": "An internal error occurred"
                    }
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<NutriError> for ApiResponse<T> {
    /// Internal error details are never sent to the client; they are logged
    /// via `tracing::error!` and replaced with a generic message.
    fn from(err: NutriError) -> Self {
        match err {
            NutriError::NotFound(ref msg) => ApiResponse::error(ErrorCode::NotFound, msg.clone()),

            NutriError::Validation(ref msg) => {
                ApiResponse::error(ErrorCode::InvalidRequest, msg.clone())
            }

            NutriError::Recognition(ref msg) => {
                tracing::warn!(error = %msg, "Recognition failed");
                ApiResponse::error(
                    ErrorCode::UpstreamError,
                    format!("Food recognition failed: {msg}"),
                )
            }

            NutriError::RecognitionUnavailable(ref msg) => {
                ApiResponse::error(ErrorCode::ServiceUnavailable, msg.clone())
            }

            ref internal @ (NutriError::Config(_)
            | NutriError::Internal(_)
            | NutriError::NutrientLookup(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Payload {
        foods: Vec<u32>,
        nutrition_source: &'static str,
    }

    #[test]
    fn success_response_flattens_payload() {
        let resp = ApiResponse::success(Payload {
            foods: vec![1, 2],
            nutrition_source: "Estimated",
        });
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["success"], true);
        assert_eq!(json["foods"], serde_json::json!([1, 2]));
        assert_eq!(json["nutrition_source"], "Estimated");
        assert!(json.get("error").is_none());
        assert!(json.get("data").is_none());
    }

    #[test]
    fn error_response_has_no_payload() {
        let resp = ApiResponse::<Payload>::error(ErrorCode::InvalidRequest, "no file");
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "invalid_request");
        assert_eq!(json["error"]["message"], "no file");
        assert!(json.get("foods").is_none());
    }

    #[test]
    fn error_code_status_mapping() {
        assert_eq!(ErrorCode::InvalidRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InternalError.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ErrorCode::UpstreamError.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ErrorCode::ServiceUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn error_code_serializes_snake_case() {
        let json = serde_json::to_value(&ErrorCode::UpstreamError).expect("serialize");
        assert_eq!(json, "upstream_error");
        assert_eq!(ErrorCode::ServiceUnavailable.to_string(), "service_unavailable");
    }

    #[test]
    fn nutri_error_mapping() {
        let resp: ApiResponse<()> = NutriError::Validation("bad weight".into()).into();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp: ApiResponse<()> = NutriError::Recognition("timeout".into()).into();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let resp: ApiResponse<()> = NutriError::RecognitionUnavailable("no key".into()).into();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn collaborator_failures_map_to_internal_error() {
        let resp: ApiResponse<()> = NutriError::NutrientLookup("USDA down".into()).into();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp: ApiResponse<()> = NutriError::Config("missing key".into()).into();
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["error"]["code"], "internal_error");
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }

    #[test]
    fn internal_errors_are_not_leaked() {
        let resp: ApiResponse<()> = NutriError::Internal("db password is hunter2".into()).into();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }
}
