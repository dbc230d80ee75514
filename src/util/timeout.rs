//! Timeout helper.

use std::future::Future;
use std::time::Duration;

use crate::auth::AuthError;

/// Errors that can represent an elapsed deadline.
pub trait TimeoutError {
    fn timed_out(millis: u64) -> Self;
}

impl TimeoutError for AuthError {
    fn timed_out(millis: u64) -> Self {
        AuthError::Timeout(millis)
    }
}

/// Wrap a future with a timeout.
pub async fn with_timeout<T, E: TimeoutError>(
    duration: Duration,
    future: impl Future<Output = Result<T, E>>,
) -> Result<T, E> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(E::timed_out(duration.as_millis() as u64)),
    }
}
