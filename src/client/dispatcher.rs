//! Bearer-authenticated transport for the resource service.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::request::{ApiRequest, ApiResponse};
use crate::auth::{RefreshCoordinator, Session, SessionStore};
use crate::error::{LobbyError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5141/api";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client used by the dispatcher.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()?)
}

/// Build a bearer `Authorization` value, skipping tokens that are not valid
/// header text.
pub fn bearer_header(session: &Session) -> Option<HeaderValue> {
    let mut value = HeaderValue::from_str(&session.bearer()).ok()?;
    value.set_sensitive(true);
    Some(value)
}

/// Result of one transmission before refresh handling.
enum Attempt {
    Done(ApiResponse),
    Unauthorized {
        token: Option<String>,
        body: String,
    },
}

/// Sends requests to the resource service with the current access token and
/// hands first-time `401`s to the [`RefreshCoordinator`].
pub struct Dispatcher {
    client: reqwest::Client,
    base_url: String,
    request_timeout: Duration,
    store: Arc<dyn SessionStore>,
    coordinator: Arc<RefreshCoordinator>,
}

impl Dispatcher {
    pub fn new(
        base_url: impl Into<String>,
        store: Arc<dyn SessionStore>,
        coordinator: Arc<RefreshCoordinator>,
        request_timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: build_http_client(request_timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout,
            store,
            coordinator,
        })
    }

    /// Share an existing client. It should enforce the same request timeout.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn coordinator(&self) -> &Arc<RefreshCoordinator> {
        &self.coordinator
    }

    /// Send a request, recovering once from an expired access token.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        if request.is_retry() {
            return self.transmit(&request).await;
        }
        match self.attempt(&request).await? {
            Attempt::Done(response) => Ok(response),
            Attempt::Unauthorized { token, .. } => {
                tracing::debug!(
                    request_id = %request.id(),
                    path = request.path(),
                    "Access token rejected; handing to refresh coordinator"
                );
                self.coordinator
                    .handle_unauthorized(self, request.into_retry(), token.as_deref())
                    .await
            }
        }
    }

    /// Send once without any refresh handling. A `401` is returned as
    /// [`LobbyError::Unauthorized`].
    pub async fn transmit(&self, request: &ApiRequest) -> Result<ApiResponse> {
        match self.attempt(request).await? {
            Attempt::Done(response) => Ok(response),
            Attempt::Unauthorized { body, .. } => {
                tracing::debug!(
                    request_id = %request.id(),
                    path = request.path(),
                    retried = request.is_retry(),
                    "Request unauthorized"
                );
                Err(LobbyError::Unauthorized { body })
            }
        }
    }

    async fn attempt(&self, request: &ApiRequest) -> Result<Attempt> {
        let session = self.store.load_session()?;

        let url = format!("{}{}", self.base_url, request.path());
        let mut builder = self.client.request(request.method().into(), url);
        if let Some(value) = session.as_ref().and_then(bearer_header) {
            builder = builder.header(AUTHORIZATION, value);
        }
        let token = session.map(|session| session.access_token);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        tracing::debug!(
            request_id = %request.id(),
            method = %request.method(),
            path = request.path(),
            retried = request.is_retry(),
            authenticated = token.is_some(),
            "Dispatching request"
        );
        let resp = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        tracing::debug!(request_id = %request.id(), status = status.as_u16(), "Response received");

        if status.is_success() {
            return Ok(Attempt::Done(ApiResponse::new(status.as_u16(), body)));
        }
        if status == StatusCode::UNAUTHORIZED {
            return Ok(Attempt::Unauthorized { token, body });
        }
        Err(LobbyError::api(status.as_u16(), body))
    }

    fn transport_error(&self, error: reqwest::Error) -> LobbyError {
        if error.is_timeout() {
            LobbyError::Timeout(self.request_timeout.as_millis() as u64)
        } else {
            LobbyError::Network(error)
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(ApiRequest::get(path)).await?.json()
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(ApiRequest::post(path).with_json(body)?).await?.json()
    }

    /// `PUT` whose response body is ignored (the resource API answers `204`).
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send(ApiRequest::put(path).with_json(body)?).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(ApiRequest::delete(path)).await?;
        Ok(())
    }
}
