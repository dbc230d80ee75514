//! Session storage, identity service client and coordinated token refresh.

pub mod coordinator;
pub mod error;
pub mod identity;
pub mod store;
pub mod teardown;
pub mod token;
pub mod waiters;

pub use coordinator::{RefreshCoordinator, RefreshState};
pub use error::AuthError;
pub use identity::{IdentityClient, RefreshClient};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, SessionStoreConfig};
pub use teardown::{SessionStatus, SessionTeardown};
pub use token::{AccessTokenResponse, Session, UserProfile};
pub use waiters::WaiterQueue;
