use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::error::AgroError;

/// Error returned by handlers, rendered as `{"error": message}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<AgroError> for ApiError {
    fn from(err: AgroError) -> Self {
        if err.is_validation() {
            ApiError::BadRequest(err.to_string())
        } else {
            tracing::error!("Request failed: {}", err);
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        assert!(matches!(
            ApiError::from(AgroError::MissingFields),
            ApiError::BadRequest(msg) if msg == "Missing required fields"
        ));
        assert!(matches!(
            ApiError::from(AgroError::InvalidInput("area".into())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(AgroError::DataSourceUnavailable("down".into())),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn renders_status_codes() {
        let response = ApiError::BadRequest("nope".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
