//! Account registration

use crate::backend::{AuthBackend, Registration};

pub const REGISTRATION_SUCCEEDED: &str = "Registration successful!";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// Characters accepted as the required special character
pub const SPECIAL_CHARACTERS: &str = "!#$&@*";
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Rule descriptions that the password fails
    #[error("Password must {}.", .0.join(", "))]
    WeakPassword(Vec<&'static str>),

    #[error("{0}")]
    Backend(String),
}

/// Rules the backend enforces, returned as the ones `password` breaks
pub fn check_password_strength(password: &str) -> Result<(), RegistrationError> {
    let mut broken = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        broken.push("be at least 8 characters long");
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        broken.push("contain at least one special character: !#$&@*");
    }
    if !password.chars().any(char::is_uppercase) {
        broken.push("contain at least one uppercase letter");
    }
    if !password.chars().any(char::is_lowercase) {
        broken.push("contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        broken.push("contain at least one number");
    }

    if broken.is_empty() {
        Ok(())
    } else {
        Err(RegistrationError::WeakPassword(broken))
    }
}

impl RegistrationForm {
    /// Local checks; nothing is sent when these fail
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }
        check_password_strength(&self.password)
    }

    /// Validate and create the account, returning the success text
    pub async fn submit<B: AuthBackend + ?Sized>(
        &self,
        backend: &B,
    ) -> Result<&'static str, RegistrationError> {
        self.validate()?;

        let registration = Registration {
            username: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        };
        match backend.register(&registration).await {
            Ok(user) => {
                tracing::info!(user_id = %user.user_id, "Account registered");
                Ok(REGISTRATION_SUCCEEDED)
            }
            Err(e) => {
                tracing::info!(error = %e, "Registration rejected");
                let message = e
                    .detail()
                    .and_then(|detail| detail.first())
                    .unwrap_or(REGISTRATION_FAILED);
                Err(RegistrationError::Backend(message.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockAuthBackend;
    use crate::backend::{BackendError, ErrorDetail, RegisteredUser};

    fn form(password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            name: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_password_rules() {
        assert!(check_password_strength("Str0ng#pw").is_ok());

        let err = check_password_strength("weak").unwrap_err();
        let RegistrationError::WeakPassword(broken) = &err else {
            panic!("unexpected error {err:?}");
        };
        assert_eq!(broken.len(), 4);
        assert!(err.to_string().starts_with("Password must be at least 8 characters long, "));
        assert!(err.to_string().ends_with('.'));

        let err = check_password_strength("Longenough1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Password must contain at least one special character: !#$&@*."
        );

        let err = check_password_strength("Longenough#").unwrap_err();
        assert_eq!(err.to_string(), "Password must contain at least one number.");
    }

    #[tokio::test]
    async fn test_mismatch_sends_nothing() {
        let mut backend = MockAuthBackend::new();
        backend.expect_register().never();

        let err = form("Str0ng#pw", "Str0ng#px").submit(&backend).await.unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[tokio::test]
    async fn test_successful_registration() {
        let mut backend = MockAuthBackend::new();
        backend
            .expect_register()
            .withf(|r| r.username == "ada" && r.email == "ada@example.com")
            .times(1)
            .returning(|r| {
                Ok(RegisteredUser {
                    user_id: "12".to_string(),
                    username: r.username.clone(),
                    email: r.email.clone(),
                })
            });

        let message = form("Str0ng#pw", "Str0ng#pw").submit(&backend).await.unwrap();
        assert_eq!(message, REGISTRATION_SUCCEEDED);
    }

    #[tokio::test]
    async fn test_backend_errors() {
        let mut backend = MockAuthBackend::new();
        backend.expect_register().times(1).returning(|_| {
            Err(BackendError::Rejected {
                status: 400,
                detail: ErrorDetail::Message("Username already registered".to_string()),
            })
        });
        let err = form("Str0ng#pw", "Str0ng#pw").submit(&backend).await.unwrap_err();
        assert_eq!(err.to_string(), "Username already registered");

        let mut backend = MockAuthBackend::new();
        backend.expect_register().returning(|_| {
            Err(BackendError::Rejected {
                status: 422,
                detail: ErrorDetail::Fields(vec![
                    "value is not a valid email".to_string(),
                    "x".to_string(),
                ]),
            })
        });
        let err = form("Str0ng#pw", "Str0ng#pw").submit(&backend).await.unwrap_err();
        assert_eq!(err.to_string(), "value is not a valid email");

        let mut backend = MockAuthBackend::new();
        backend
            .expect_register()
            .returning(|_| Err(BackendError::Network("offline".to_string())));
        let err = form("Str0ng#pw", "Str0ng#pw").submit(&backend).await.unwrap_err();
        assert_eq!(err.to_string(), REGISTRATION_FAILED);
    }
}
