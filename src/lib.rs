//! Lobby — hotel back-office API client
//!
//! Talks to the reservation/activity resource API and the identity service.
//! Every resource call carries the current bearer token; when the token has
//! expired, concurrent failures share a single refresh and are replayed once.
//!
//! # Quick Start
//!
//! ```no_run
//! use lobby::prelude::*;
//!
//! # async fn example() -> lobby::error::Result<()> {
//! let client = LobbyClient::from_env()?;
//! client.login("desk@hotel.test", "secret").await?;
//! let activities = client.activities().list().await?;
//! println!("{} activities", activities.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod prelude;
pub mod resources;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
