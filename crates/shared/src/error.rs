//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed (missing or expired token).
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend or an upstream provider answered with a failure.
    #[error("External service error: {message}")]
    ExternalService {
        /// HTTP status, when the failure came with one.
        status: Option<u16>,
        /// Message reported by the service (`mensagem` in backend bodies).
        message: String,
    },

    /// A response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Shorthand for an upstream failure without an HTTP status.
    #[must_use]
    pub fn external(message: impl Into<String>) -> Self {
        Self::ExternalService {
            status: None,
            message: message.into(),
        }
    }

    /// Returns the HTTP status associated with this error, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(400),
            Self::ExternalService { status, .. } => *status,
            Self::Decode(_) | Self::Config(_) | Self::Internal(_) => None,
        }
    }

    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Text to show the user when a load fails.
    ///
    /// A message reported by the backend wins; otherwise `fallback` is used.
    /// Decode, config and internal failures always use `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        let reported = match self {
            Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Validation(message)
            | Self::ExternalService { message, .. } => Some(message.trim()),
            Self::Decode(_) | Self::Config(_) | Self::Internal(_) => None,
        };
        reported
            .filter(|m| !m.is_empty())
            .map_or_else(|| fallback.to_string(), str::to_string)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
