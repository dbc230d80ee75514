//! Shared test harness: mock resource API + mock identity service.
#![allow(dead_code)]

use std::sync::Arc;

use lobby::auth::{MemorySessionStore, Session, SessionStore};
use lobby::client::LobbyClient;
use lobby::config::LobbyConfig;
use wiremock::MockServer;

pub struct Harness {
    pub api: MockServer,
    pub identity: MockServer,
    pub store: Arc<MemorySessionStore>,
    pub client: LobbyClient,
}

impl Harness {
    pub async fn start(session: Option<Session>) -> Self {
        Self::start_with(session, |config| config).await
    }

    /// Like [`Harness::start`], with a hook to adjust the client config.
    pub async fn start_with(
        session: Option<Session>,
        configure: impl FnOnce(LobbyConfig) -> LobbyConfig,
    ) -> Self {
        let api = MockServer::start().await;
        let identity = MockServer::start().await;
        let store = Arc::new(match session {
            Some(session) => MemorySessionStore::with_session(session),
            None => MemorySessionStore::new(),
        });
        let config = LobbyConfig::new()
            .with_api_base_url(format!("{}/api", api.uri()))
            .with_identity_base_url(identity.uri());
        let config = configure(config);
        let client = LobbyClient::with_store(config, store.clone()).expect("client");
        Self {
            api,
            identity,
            store,
            client,
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.store.load_session().expect("load session")
    }

    /// Requests the identity service saw on `path`.
    pub async fn identity_calls(&self, path: &str) -> usize {
        self.identity
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path() == path)
            .count()
    }

    /// `Authorization` headers the resource API saw, in arrival order.
    pub async fn api_authorizations(&self) -> Vec<Option<String>> {
        self.api
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|req| {
                req.headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            })
            .collect()
    }
}

pub fn token_json(access: &str, refresh: &str) -> serde_json::Value {
    serde_json::json!({
        "tokenType": "Bearer",
        "accessToken": access,
        "expiresIn": 3600,
        "refreshToken": refresh
    })
}
