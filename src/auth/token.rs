use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The access/refresh token pair for the signed-in user.
///
/// Always written and cleared as a whole; a store never holds an access token
/// from one grant next to a refresh token from another.
///
/// # Example
/// ```
/// use lobby::auth::Session;
///
/// let session = Session::new("access", "refresh");
/// assert_eq!(session.bearer(), "Bearer access");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: None,
            expires_at: None,
        }
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Token payload returned by the identity service's `/login` and `/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl AccessTokenResponse {
    /// Convert into a [`Session`], stamping the expiry relative to `now`.
    pub fn into_session(self, now: DateTime<Utc>) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: self.token_type,
            expires_at: self.expires_in.map(|secs| now + Duration::seconds(secs)),
        }
    }
}

/// Cached identity of the signed-in user (`GET /manage/info`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    #[serde(default)]
    pub is_email_confirmed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_parses_identity_payload() {
        let raw = r#"{"tokenType":"Bearer","accessToken":"a1","expiresIn":3600,"refreshToken":"r1"}"#;
        let parsed: AccessTokenResponse = serde_json::from_str(raw).unwrap();
        let now = Utc::now();
        let session = parsed.into_session(now);

        assert_eq!(session.access_token, "a1");
        assert_eq!(session.refresh_token, "r1");
        assert_eq!(session.token_type.as_deref(), Some("Bearer"));
        assert_eq!(session.expires_at, Some(now + Duration::seconds(3600)));
    }

    #[test]
    fn token_response_without_expiry_leaves_it_unset() {
        let raw = r#"{"accessToken":"a1","refreshToken":"r1"}"#;
        let parsed: AccessTokenResponse = serde_json::from_str(raw).unwrap();
        let session = parsed.into_session(Utc::now());
        assert_eq!(session.expires_at, None);
        assert_eq!(session.bearer(), "Bearer a1");
    }
}
