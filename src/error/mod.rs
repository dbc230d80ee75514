//! Error types for Lobby.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

use crate::auth::AuthError;

/// Primary error type for all Lobby operations.
#[derive(Error, Debug)]
pub enum LobbyError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The resource service rejected a request that was already replayed
    /// once after a refresh.
    #[error("Unauthorized: {body}")]
    Unauthorized { body: String },

    /// Refreshing the session failed; the session has been torn down.
    #[error("Session refresh failed: {0}")]
    RefreshFailed(AuthError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The resource service did not answer within the request timeout.
    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

impl LobbyError {
    /// Create an API error from a status and response body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unauthorized { .. } => ErrorCategory::Authentication,
            Self::RefreshFailed(_) => ErrorCategory::Session,
            Self::Auth(err) => match err {
                AuthError::Network(_) => ErrorCategory::Network,
                AuthError::Timeout(_) => ErrorCategory::Timeout,
                AuthError::Io(_) | AuthError::Serialization(_) => ErrorCategory::Configuration,
                _ => ErrorCategory::Authentication,
            },
            Self::Network(_) => ErrorCategory::Network,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                404 => ErrorCategory::NotFound,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
        }
    }

    /// Whether this error is potentially retryable by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Timeout | ErrorCategory::Server
        )
    }

    /// Whether the session is gone and the user has to sign in again.
    pub fn requires_sign_in(&self) -> bool {
        matches!(self.category(), ErrorCategory::Session)
            || matches!(self, Self::Auth(AuthError::NotLoggedIn))
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Authentication => RecoverySuggestion::CheckCredentials,
            ErrorCategory::Session => RecoverySuggestion::SignInAgain,
            ErrorCategory::Network | ErrorCategory::Server => RecoverySuggestion::RetryWithBackoff,
            ErrorCategory::Timeout => RecoverySuggestion::IncreaseTimeout,
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            _ => RecoverySuggestion::ContactSupport,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LobbyError>;
