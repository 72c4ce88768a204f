//! Contract with the task backend's auth endpoints

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `detail` field of a backend error body
///
/// The backend reports either a single message or a list of field errors
/// shaped like `{"msg": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ErrorDetail {
    #[default]
    Missing,
    Message(String),
    Fields(Vec<String>),
}

impl ErrorDetail {
    /// Parse a response body; anything that is not a JSON `detail` is `Missing`
    pub fn parse(body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(body) else {
            return Self::Missing;
        };
        match value.get("detail") {
            Some(Value::String(message)) => Self::Message(message.clone()),
            Some(Value::Array(items)) => {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(message) => Some(message.clone()),
                        other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                    })
                    .collect();
                if messages.is_empty() {
                    Self::Missing
                } else {
                    Self::Fields(messages)
                }
            }
            _ => Self::Missing,
        }
    }

    /// All messages joined with `", "`
    pub fn joined(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Message(message) => Some(message.clone()),
            Self::Fields(messages) => Some(messages.join(", ")),
        }
    }

    /// The message, or the first field error
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Missing => None,
            Self::Message(message) => Some(message),
            Self::Fields(messages) => messages.first().map(String::as_str),
        }
    }
}

/// Failure of a backend call, classified the way the auth flows react to it
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// 401: bad credentials or an expired token
    #[error("unauthorized")]
    Unauthorized(ErrorDetail),

    /// 404: for user-info lookups this means the user must register
    #[error("not found")]
    NotFound(ErrorDetail),

    /// Any other non-success status
    #[error("backend rejected the request with status {status}")]
    Rejected { status: u16, detail: ErrorDetail },

    /// Backend unreachable or response unreadable
    #[error("backend unreachable: {0}")]
    Network(String),
}

impl BackendError {
    pub fn detail(&self) -> Option<&ErrorDetail> {
        match self {
            Self::Unauthorized(detail) | Self::NotFound(detail) => Some(detail),
            Self::Rejected { detail, .. } => Some(detail),
            Self::Network(_) => None,
        }
    }
}

/// Backend ids are JSON numbers; accept strings too and keep them as text
mod id_text {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    impl RawId {
        fn into_text(self) -> String {
            match self {
                Self::Number(n) => n.to_string(),
                Self::Text(s) => s,
            }
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        RawId::deserialize(deserializer).map(RawId::into_text)
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(Option::<RawId>::deserialize(deserializer)?.map(RawId::into_text))
    }
}

/// Successful `POST /auth/login` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default, deserialize_with = "id_text::deserialize_option")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

/// Successful `GET /auth/get-user-info/{email}` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub access_token: String,
    #[serde(deserialize_with = "id_text::deserialize")]
    pub user_id: String,
    pub is_admin: bool,
}

/// `POST /auth/register` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Successful `POST /auth/register` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    #[serde(deserialize_with = "id_text::deserialize")]
    pub user_id: String,
    pub username: String,
    pub email: String,
}

/// Auth endpoints of the backend
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AuthBackend {
    /// Exchange credentials for a token (`POST /auth/login`, form-encoded)
    async fn login(&self, username: &str, password: &str) -> Result<TokenGrant, BackendError>;

    /// Create an account (`POST /auth/register`)
    async fn register(&self, registration: &Registration) -> Result<RegisteredUser, BackendError>;

    /// Look up the backend user for a provider email
    async fn user_info(&self, email: &str) -> Result<UserInfo, BackendError>;

    /// Check that a token is still accepted (`GET /protected-route`)
    async fn check_token(&self, token: &str) -> Result<(), BackendError>;

    /// Record a login in the user's history
    async fn stamp_login(&self, user_id: &str) -> Result<(), BackendError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_message() {
        let detail = ErrorDetail::parse(r#"{"detail":"Invalid credentials"}"#);
        assert_eq!(detail, ErrorDetail::Message("Invalid credentials".to_string()));
        assert_eq!(detail.joined().as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_error_detail_field_list() {
        let body = r#"{"detail":[{"loc":["body","username"],"msg":"field required"},{"msg":"too short"}]}"#;
        let detail = ErrorDetail::parse(body);
        assert_eq!(detail.joined().as_deref(), Some("field required, too short"));
        assert_eq!(detail.first(), Some("field required"));
    }

    #[test]
    fn test_error_detail_missing() {
        assert_eq!(ErrorDetail::parse("Unauthorized"), ErrorDetail::Missing);
        assert_eq!(ErrorDetail::parse("{}"), ErrorDetail::Missing);
        assert_eq!(ErrorDetail::parse(r#"{"detail":[]}"#), ErrorDetail::Missing);
        assert_eq!(ErrorDetail::Missing.joined(), None);
    }

    #[test]
    fn test_numeric_ids_become_text() {
        let info: UserInfo =
            serde_json::from_str(r#"{"access_token":"t","user_id":42,"is_admin":false}"#).unwrap();
        assert_eq!(info.user_id, "42");

        let grant: TokenGrant =
            serde_json::from_str(r#"{"access_token":"t","token_type":"bearer"}"#).unwrap();
        assert_eq!(grant.user_id, None);
        assert_eq!(grant.is_admin, None);

        let grant: TokenGrant =
            serde_json::from_str(r#"{"access_token":"t","user_id":"9","is_admin":true}"#).unwrap();
        assert_eq!(grant.user_id.as_deref(), Some("9"));
    }
}
