//! Convenience re-exports for common use.

pub use crate::auth::{Session, SessionStatus, SessionStore, UserProfile};
pub use crate::client::{ApiRequest, ApiResponse, LobbyClient};
pub use crate::config::LobbyConfig;
pub use crate::error::{LobbyError, Result};
pub use crate::resources::{Activity, ActivityBooking, DashboardStats, RoomBooking};
