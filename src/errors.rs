use thiserror::Error;

/// Error codes reported by the hosted auth provider. The vocabulary is fixed;
/// anything outside it collapses to `Unknown` instead of failing the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthCode {
    UserNotFound,
    WrongPassword,
    EmailAlreadyInUse,
    WeakPassword,
    Unknown,
}

impl AuthCode {
    pub fn from_provider(code: &str) -> Self {
        match code {
            "auth/user-not-found" => Self::UserNotFound,
            "auth/wrong-password" => Self::WrongPassword,
            "auth/email-already-in-use" => Self::EmailAlreadyInUse,
            "auth/weak-password" => Self::WeakPassword,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserNotFound => "auth/user-not-found",
            Self::WrongPassword => "auth/wrong-password",
            Self::EmailAlreadyInUse => "auth/email-already-in-use",
            Self::WeakPassword => "auth/weak-password",
            Self::Unknown => "auth/unknown",
        }
    }

    /// Fixed user-facing message for the login form.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::UserNotFound => "No account found with this email.",
            Self::WrongPassword => "Incorrect password. Please try again.",
            Self::EmailAlreadyInUse => "This email is already in use.",
            Self::WeakPassword => "Password must be at least 6 characters.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("AUTH_FAILED: {}", .0.as_str())]
    Auth(AuthCode),
    #[error("REMOTE_READ: {0}")]
    RemoteRead(String),
    #[error("REMOTE_WRITE: {0}")]
    RemoteWrite(String),
    #[error("GENERATION_FAILED: {0}")]
    Generation(String),
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error("INTERNAL: {0}")]
    Internal(String),
}

impl AppError {
    pub fn auth(code: &str) -> Self {
        Self::Auth(AuthCode::from_provider(code))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
