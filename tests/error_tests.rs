//! Tests for the error system.

use lobby::auth::AuthError;
use lobby::error::unified::*;
use lobby::error::*;

#[test]
fn error_api_creation() {
    let err = LobbyError::api(404, "Not found");
    assert!(matches!(&err, LobbyError::Api { status: 404, .. }));
    assert_eq!(err.to_string(), "API error (status 404): Not found");
}

#[test]
fn error_helper_mappings_are_stable_for_major_variants() {
    struct Case {
        error: LobbyError,
        expected_category: ErrorCategory,
        expected_retryable: bool,
        expected_recovery: RecoverySuggestion,
    }

    let network_error = reqwest::Client::new()
        .get("http://[::1")
        .build()
        .unwrap_err();
    let serde_error = serde_json::from_str::<serde_json::Value>("{not-json}").unwrap_err();

    let cases = vec![
        Case {
            error: LobbyError::Unauthorized {
                body: String::new(),
            },
            expected_category: ErrorCategory::Authentication,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::CheckCredentials,
        },
        Case {
            error: LobbyError::RefreshFailed(AuthError::ExpiredOrInvalidGrant),
            expected_category: ErrorCategory::Session,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::SignInAgain,
        },
        Case {
            error: LobbyError::RefreshFailed(AuthError::Network("down".to_string())),
            expected_category: ErrorCategory::Session,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::SignInAgain,
        },
        Case {
            error: LobbyError::Auth(AuthError::InvalidCredentials),
            expected_category: ErrorCategory::Authentication,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::CheckCredentials,
        },
        Case {
            error: LobbyError::Auth(AuthError::Network("reset".to_string())),
            expected_category: ErrorCategory::Network,
            expected_retryable: true,
            expected_recovery: RecoverySuggestion::RetryWithBackoff,
        },
        Case {
            error: LobbyError::Timeout(5000),
            expected_category: ErrorCategory::Timeout,
            expected_retryable: true,
            expected_recovery: RecoverySuggestion::IncreaseTimeout,
        },
        Case {
            error: LobbyError::Configuration("bad-config".to_string()),
            expected_category: ErrorCategory::Configuration,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::CheckConfiguration,
        },
        Case {
            error: LobbyError::Network(network_error),
            expected_category: ErrorCategory::Network,
            expected_retryable: true,
            expected_recovery: RecoverySuggestion::RetryWithBackoff,
        },
        Case {
            error: LobbyError::Serialization(serde_error),
            expected_category: ErrorCategory::Serialization,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::ContactSupport,
        },
        Case {
            error: LobbyError::api(403, "Forbidden"),
            expected_category: ErrorCategory::Authentication,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::CheckCredentials,
        },
        Case {
            error: LobbyError::api(404, "Missing"),
            expected_category: ErrorCategory::NotFound,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::ContactSupport,
        },
        Case {
            error: LobbyError::api(503, "Server unavailable"),
            expected_category: ErrorCategory::Server,
            expected_retryable: true,
            expected_recovery: RecoverySuggestion::RetryWithBackoff,
        },
        Case {
            error: LobbyError::api(418, "Teapot"),
            expected_category: ErrorCategory::Api,
            expected_retryable: false,
            expected_recovery: RecoverySuggestion::ContactSupport,
        },
        Case {
            error: LobbyError::Auth(AuthError::Timeout(1500)),
            expected_category: ErrorCategory::Timeout,
            expected_retryable: true,
            expected_recovery: RecoverySuggestion::IncreaseTimeout,
        },
    ];

    for case in cases {
        assert_eq!(case.error.category(), case.expected_category);
        assert_eq!(case.error.is_retryable(), case.expected_retryable);
        assert_eq!(case.error.recovery_suggestion(), case.expected_recovery);
    }
}

#[test]
fn refresh_failure_and_missing_login_require_sign_in() {
    assert!(LobbyError::RefreshFailed(AuthError::NotLoggedIn).requires_sign_in());
    assert!(LobbyError::Auth(AuthError::NotLoggedIn).requires_sign_in());
    assert!(!LobbyError::Unauthorized {
        body: String::new()
    }
    .requires_sign_in());
}

#[test]
fn refresh_failure_message_wraps_cause() {
    let err = LobbyError::RefreshFailed(AuthError::ExpiredOrInvalidGrant);
    assert_eq!(err.to_string(), "Session refresh failed: Expired or invalid grant");
}
