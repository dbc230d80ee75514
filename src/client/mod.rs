//! Request dispatch and the [`LobbyClient`] facade.

pub mod dispatcher;
pub mod request;

pub use dispatcher::Dispatcher;
pub use request::{ApiRequest, ApiResponse, Method};

use std::sync::Arc;

use tokio::sync::watch;

use crate::auth::{
    AuthError, FileSessionStore, IdentityClient, RefreshCoordinator, Session, SessionStatus,
    SessionStore, SessionStoreConfig, SessionTeardown, UserProfile,
};
use crate::config::LobbyConfig;
use crate::error::{LobbyError, Result};
use crate::resources::{Activities, ActivityBookings, DashboardStats, RoomBookings};

/// Entry point for talking to the hotel back office.
///
/// Owns one session store, one refresh coordinator and one dispatcher; every
/// resource call made through it shares the same refresh cycle.
///
/// # Example
/// ```no_run
/// use lobby::client::LobbyClient;
/// use lobby::config::LobbyConfig;
///
/// # async fn example() -> lobby::error::Result<()> {
/// let client = LobbyClient::new(LobbyConfig::from_env()?)?;
/// client.login("desk@hotel.test", "secret").await?;
/// for booking in client.room_bookings().list().await? {
///     println!("{} -> room {}", booking.id, booking.room_id);
/// }
/// # Ok(())
/// # }
/// ```
pub struct LobbyClient {
    config: LobbyConfig,
    store: Arc<dyn SessionStore>,
    identity: Arc<IdentityClient>,
    teardown: SessionTeardown,
    dispatcher: Dispatcher,
}

impl LobbyClient {
    /// Client backed by the file session store in `config.session_dir`.
    pub fn new(config: LobbyConfig) -> Result<Self> {
        let store = FileSessionStore::new(SessionStoreConfig::new(config.session_dir.clone()));
        Self::with_store(config, Arc::new(store))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(LobbyConfig::from_env()?)
    }

    /// Client backed by a caller-provided session store.
    pub fn with_store(config: LobbyConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        config.validate()?;
        let http = dispatcher::build_http_client(config.request_timeout)?;
        let identity = Arc::new(
            IdentityClient::new(store.clone())
                .with_base_url(config.identity_base_url.clone())
                .with_http_client(http.clone()),
        );
        let teardown = SessionTeardown::new(store.clone());
        let coordinator = Arc::new(
            RefreshCoordinator::new(store.clone(), identity.clone(), teardown.clone())
                .with_refresh_timeout(config.refresh_timeout),
        );
        let dispatcher = Dispatcher::new(
            config.api_base_url.clone(),
            store.clone(),
            coordinator,
            config.request_timeout,
        )?
        .with_http_client(http);
        Ok(Self {
            config,
            store,
            identity,
            teardown,
            dispatcher,
        })
    }

    pub fn config(&self) -> &LobbyConfig {
        &self.config
    }

    pub fn identity(&self) -> &IdentityClient {
        &self.identity
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Sign in, store the token pair and cache the user's profile.
    ///
    /// A failed profile lookup does not undo the sign-in.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let session = self.identity.login(email, password).await?;
        self.teardown.mark_authenticated();
        if let Err(error) = self.identity.user_info(&session.access_token).await {
            tracing::warn!(%error, "Signed in but could not load user profile");
        }
        Ok(session)
    }

    /// Re-read the profile from the identity service.
    pub async fn refresh_profile(&self) -> Result<UserProfile> {
        let session = self
            .store
            .load_session()?
            .ok_or(LobbyError::Auth(AuthError::NotLoggedIn))?;
        Ok(self.identity.user_info(&session.access_token).await?)
    }

    /// Clear the session. Safe to call when already signed out.
    pub fn logout(&self) -> Result<()> {
        self.teardown.teardown()?;
        tracing::info!("Signed out");
        Ok(())
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<()> {
        Ok(self.identity.register(email, password).await?)
    }

    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        Ok(self.identity.forgot_password(email).await?)
    }

    pub async fn reset_password(
        &self,
        email: &str,
        reset_code: &str,
        new_password: &str,
    ) -> Result<()> {
        Ok(self
            .identity
            .reset_password(email, reset_code, new_password)
            .await?)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.store.load_session(), Ok(Some(_)))
    }

    pub fn stored_profile(&self) -> Result<Option<UserProfile>> {
        Ok(self.store.load_profile()?)
    }

    /// Watch for sign-in / sign-out transitions, including forced sign-out
    /// after a failed refresh.
    pub fn session_status(&self) -> watch::Receiver<SessionStatus> {
        self.teardown.subscribe()
    }

    pub fn activities(&self) -> Activities<'_> {
        Activities::new(&self.dispatcher)
    }

    pub fn activity_bookings(&self) -> ActivityBookings<'_> {
        ActivityBookings::new(&self.dispatcher)
    }

    pub fn room_bookings(&self) -> RoomBookings<'_> {
        RoomBookings::new(&self.dispatcher)
    }

    /// Fetch the three collections concurrently and summarize them.
    ///
    /// An expired token surfaces as three `401`s at once; they share one
    /// refresh like any other burst.
    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let activities = self.activities();
        let activity_bookings = self.activity_bookings();
        let room_bookings = self.room_bookings();
        let (activities, activity_bookings, room_bookings) = tokio::try_join!(
            activities.list(),
            activity_bookings.list(),
            room_bookings.list(),
        )?;
        Ok(DashboardStats::from_collections(
            &activities,
            &activity_bookings,
            &room_bookings,
        ))
    }
}
