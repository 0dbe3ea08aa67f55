use std::time::Duration;

use time::OffsetDateTime;

/// Time source for sessions. The polling engine waits only through [`Clock::sleep`].
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> OffsetDateTime;

    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultClock;

#[async_trait::async_trait]
impl Clock for DefaultClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}
