use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("must specify a position when there isn't exactly one to choose from ({available} available)")]
    AmbiguousPosition { available: usize },

    #[error("no value supplied for path parameter `{0}`")]
    MissingPathParameter(String),

    #[error("login response carried no usable XSRF-TOKEN cookie")]
    MissingCsrfCookie,

    #[error("Unauthorized - session may have expired")]
    Unauthorized,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ClientError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ClientError::Unauthorized,
            403 => ClientError::AccessDenied(truncated),
            404 => ClientError::NotFound(truncated),
            500..=599 => ClientError::ServerError(truncated),
            _ => ClientError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ClientError::from_status(StatusCode::UNAUTHORIZED, ""),
            ClientError::Unauthorized
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::FORBIDDEN, "nope"),
            ClientError::AccessDenied(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, ""),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, "upstream"),
            ClientError::ServerError(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::IM_A_TEAPOT, ""),
            ClientError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_long_body_is_truncated() {
        let body = "x".repeat(2000);
        let err = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        let message = err.to_string();
        assert!(message.contains("truncated, 2000 total bytes"));
        assert!(message.len() < body.len());
    }
}
