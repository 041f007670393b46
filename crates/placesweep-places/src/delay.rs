//! Injectable wait used before following a continuation token.

use std::future::Future;
use std::time::Duration;

pub trait Delay {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Real wall-clock delay via `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
