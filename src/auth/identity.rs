//! Client for the identity service: login, refresh and account flows.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::Serialize;

use super::error::AuthError;
use super::store::SessionStore;
use super::token::{AccessTokenResponse, Session, UserProfile};

pub const DEFAULT_IDENTITY_BASE_URL: &str = "http://localhost:5117";

/// Exchanges a refresh token for a new token pair.
///
/// The refresh coordinator only depends on this seam, never on HTTP details.
#[async_trait]
pub trait RefreshClient: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError>;
}

/// HTTP client for the identity service.
///
/// `login` persists the returned pair; `refresh` does not, leaving the write
/// to the coordinator that owns the refresh cycle.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use lobby::auth::{IdentityClient, MemorySessionStore};
///
/// # async fn example() -> Result<(), lobby::auth::AuthError> {
/// let identity = IdentityClient::new(Arc::new(MemorySessionStore::new()))
///     .with_base_url("http://localhost:5117");
/// identity.login("desk@hotel.test", "secret").await?;
/// # Ok(())
/// # }
/// ```
pub struct IdentityClient {
    client: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    email: &'a str,
    reset_code: &'a str,
    new_password: &'a str,
}

impl IdentityClient {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_IDENTITY_BASE_URL.to_string(),
            store,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sign in and store the issued token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let resp = self
            .client
            .post(self.url("/login"))
            .json(&Credentials { email, password })
            .send()
            .await?;
        match resp.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST => {
                return Err(AuthError::InvalidCredentials)
            }
            status => {
                return Err(AuthError::InvalidResponse(format!(
                    "Login failed with status {status}"
                )))
            }
        }
        let payload: AccessTokenResponse = resp.json().await?;
        if payload.access_token.is_empty() || payload.refresh_token.is_empty() {
            return Err(AuthError::InvalidResponse(
                "Login response missing token pair".to_string(),
            ));
        }
        let session = payload.into_session(Utc::now());
        self.store.save_session(&session)?;
        tracing::info!(email, "Signed in");
        Ok(session)
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let resp = self
            .client
            .post(self.url("/register"))
            .json(&Credentials { email, password })
            .send()
            .await?;
        expect_success(resp, "Registration").await
    }

    /// Ask the identity service to email a password reset code.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let resp = self
            .client
            .post(self.url("/forgotPassword"))
            .json(&ForgotPasswordRequest { email })
            .send()
            .await?;
        expect_success(resp, "Password reset request").await
    }

    pub async fn reset_password(
        &self,
        email: &str,
        reset_code: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let resp = self
            .client
            .post(self.url("/resetPassword"))
            .json(&ResetPasswordRequest {
                email,
                reset_code,
                new_password,
            })
            .send()
            .await?;
        expect_success(resp, "Password reset").await
    }

    /// Fetch the signed-in user's profile and cache it in the store.
    pub async fn user_info(&self, access_token: &str) -> Result<UserProfile, AuthError> {
        let resp = self
            .client
            .get(self.url("/manage/info"))
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            return Err(AuthError::ExpiredOrInvalidGrant);
        }
        if !resp.status().is_success() {
            return Err(AuthError::InvalidResponse(format!(
                "User info request failed with status {}",
                resp.status()
            )));
        }
        let profile: UserProfile = resp.json().await?;
        self.store.save_profile(&profile)?;
        Ok(profile)
    }
}

#[async_trait]
impl RefreshClient for IdentityClient {
    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let resp = self
            .client
            .post(self.url("/refresh"))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        match resp.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST => {
                return Err(AuthError::ExpiredOrInvalidGrant)
            }
            status => {
                return Err(AuthError::InvalidResponse(format!(
                    "Refresh failed with status {status}"
                )))
            }
        }
        let payload: AccessTokenResponse = resp.json().await?;
        if payload.access_token.is_empty() || payload.refresh_token.is_empty() {
            return Err(AuthError::InvalidResponse(
                "Refresh response missing token pair".to_string(),
            ));
        }
        Ok(payload.into_session(Utc::now()))
    }
}

async fn expect_success(resp: reqwest::Response, what: &str) -> Result<(), AuthError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let body = resp.text().await.unwrap_or_default();
    Err(AuthError::InvalidResponse(format!(
        "{what} failed with status {status}: {body}"
    )))
}
