use serde::Serialize;
use thiserror::Error;

pub const NO_DATA: &str = "No data received";
pub const INVALID_JSON: &str = "Invalid JSON payload";
pub const USERNAME_REQUIRED: &str = "Username is required";
pub const NO_FOLLOWERS: &str =
    "Unable to fetch followers. Profile may be private, restricted, or unavailable.";
pub const NO_POSTS: &str = "No posts found for engagement calculation";

/// Errors that cross the handler boundary and become an HTTP reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Bad or missing input from the caller.
    #[error("{0}")]
    Validation(&'static str),

    /// The scraper gave up or returned nothing usable.
    #[error("{0}")]
    UpstreamUnavailable(&'static str),

    #[error("Server error: {0}")]
    Internal(String),
}

/// JSON body of every failed request: `{"error": "..."}`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Validation(_) | ApiError::UpstreamUnavailable(_) => 400,
            ApiError::Internal(_) => 500,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

impl From<worker::Error> for ApiError {
    fn from(e: worker::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        let err = ApiError::Validation(USERNAME_REQUIRED);
        assert_eq!(err.status(), 400);
        assert_eq!(err.body().error, "Username is required");
    }

    #[test]
    fn upstream_errors_are_bad_requests() {
        let err = ApiError::UpstreamUnavailable(NO_FOLLOWERS);
        assert_eq!(err.status(), 400);
        assert_eq!(
            err.body().error,
            "Unable to fetch followers. Profile may be private, restricted, or unavailable."
        );
    }

    #[test]
    fn internal_errors_forward_the_message() {
        let err = ApiError::Internal("body stream closed".to_string());
        assert_eq!(err.status(), 500);
        assert_eq!(err.body().error, "Server error: body stream closed");
    }

    #[test]
    fn error_body_serializes_as_single_field() {
        let json = serde_json::to_value(ApiError::Validation(INVALID_JSON).body()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid JSON payload" }));
    }
}
