//! Client error types

use taskdesk_core::{BackendError, ErrorDetail};
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Bad credentials or an expired token
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Request body failed backend validation
    #[error("Unprocessable request: {0}")]
    Unprocessable(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration, or no token for an authenticated call
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            422 => Self::Unprocessable(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// The session token is no longer accepted
    pub const fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// HTTP status behind this error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Unprocessable(_) => Some(422),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(e) => e.status().as_ref().map(reqwest::StatusCode::as_u16),
            Self::Serialization(_) | Self::Configuration(_) => None,
        }
    }

    /// Parsed `detail` of the response body
    pub fn detail(&self) -> ErrorDetail {
        match self {
            Self::BadRequest(body)
            | Self::AuthenticationFailed(body)
            | Self::Forbidden(body)
            | Self::NotFound(body)
            | Self::Unprocessable(body)
            | Self::ServerError { message: body, .. } => ErrorDetail::parse(body),
            Self::Request(_) | Self::Serialization(_) | Self::Configuration(_) => {
                ErrorDetail::Missing
            }
        }
    }
}

impl From<ClientError> for BackendError {
    fn from(err: ClientError) -> Self {
        match (&err, err.status()) {
            (ClientError::AuthenticationFailed(_), _) => Self::Unauthorized(err.detail()),
            (ClientError::NotFound(_), _) => Self::NotFound(err.detail()),
            (
                ClientError::BadRequest(_)
                | ClientError::Forbidden(_)
                | ClientError::Unprocessable(_)
                | ClientError::ServerError { .. },
                Some(status),
            ) => Self::Rejected {
                status,
                detail: err.detail(),
            },
            _ => Self::Network(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_mapping() {
        let err = ClientError::from_status(StatusCode::UNAUTHORIZED, String::new());
        assert!(err.is_auth_expired());
        assert!(matches!(
            ClientError::from_status(StatusCode::UNPROCESSABLE_ENTITY, String::new()),
            ClientError::Unprocessable(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, String::new()),
            ClientError::ServerError { status: 502, .. }
        ));
    }

    #[test]
    fn test_backend_error_conversion() {
        let err = ClientError::AuthenticationFailed(r#"{"detail":"Invalid credentials"}"#.into());
        assert_eq!(
            BackendError::from(err),
            BackendError::Unauthorized(ErrorDetail::Message("Invalid credentials".into()))
        );

        let err = ClientError::NotFound(r#"{"detail":"User not found"}"#.into());
        assert!(matches!(BackendError::from(err), BackendError::NotFound(_)));

        let err = ClientError::Unprocessable(r#"{"detail":[{"msg":"field required"}]}"#.into());
        assert_eq!(
            BackendError::from(err),
            BackendError::Rejected {
                status: 422,
                detail: ErrorDetail::Fields(vec!["field required".into()]),
            }
        );

        let err = ClientError::Configuration("base_url is required".into());
        assert!(matches!(BackendError::from(err), BackendError::Network(_)));
    }
}
