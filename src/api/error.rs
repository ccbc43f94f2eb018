// src/api/error.rs
use super::responses::{json_bytes, ErrorBody};
use hyper::{header, Body, Method, Response, StatusCode};

/// Request-level failures. Probe failures are not errors: they are reported
/// in the response body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no route for {0}")]
    NotFound(String),

    #[error("unknown service: {0}")]
    UnknownService(String),

    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::UnknownService(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ApiError> for Response<Body> {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        // ErrorBody holds a single string; encoding it cannot fail.
        let bytes = serde_json::to_vec(&ErrorBody { error: &message }).unwrap_or_default();

        let mut response = json_bytes(err.status(), bytes);
        if let ApiError::MethodNotAllowed(_) = err {
            response
                .headers_mut()
                .insert(header::ALLOW, header::HeaderValue::from_static("GET"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_renders_json_body() {
        let response: Response<Body> = ApiError::UnknownService("plex".to_string()).into();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "unknown service: plex");
    }

    #[test]
    fn test_method_not_allowed_sets_allow_header() {
        let response: Response<Body> = ApiError::MethodNotAllowed(Method::POST).into();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET");
    }
}
