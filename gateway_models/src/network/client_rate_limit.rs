use error_stack::report;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter, clock::DefaultClock};
use reqwest::{Client as ReqwestClient, Error as ReqwestError, Request, Response};
use std::sync::Arc;

use crate::error::{Error, ModelResult};
use crate::network::RateLimitWindow;

/// Outbound HTTP client, optionally throttled.
#[derive(Debug, Clone)]
pub enum Client {
    RateLimited(RateLimitedClient),
    Unrestricted(ReqwestClient),
}

impl Client {
    pub fn new(inner: ReqwestClient, limit: Option<RateLimitWindow>) -> ModelResult<Self> {
        match limit {
            Some(limit) => Ok(Client::RateLimited(RateLimitedClient::new(inner, limit)?)),
            None => Ok(Client::Unrestricted(inner)),
        }
    }

    pub async fn execute(&self, req: Request) -> Result<Response, ReqwestError> {
        match self {
            Client::RateLimited(rate_limited_client) => rate_limited_client.execute(req).await,
            Client::Unrestricted(unrestricted_client) => unrestricted_client.execute(req).await,
        }
    }

    pub fn inner_client(&self) -> &ReqwestClient {
        match self {
            Client::RateLimited(rate_limited_client) => rate_limited_client.inner_client(),
            Client::Unrestricted(unrestricted_client) => unrestricted_client,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RateLimitedClient {
    inner: ReqwestClient,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimitedClient {
    pub fn new(inner: ReqwestClient, limit: RateLimitWindow) -> ModelResult<Self> {
        let quota = match limit {
            RateLimitWindow::PerSecond(allowed) => Quota::per_second(allowed),
            RateLimitWindow::PerMinute(allowed) => Quota::per_minute(allowed),
            RateLimitWindow::Custom { period } => Quota::with_period(period).ok_or_else(|| {
                report!(Error::ParseError).attach_printable("Rate limit period must be non-zero")
            })?,
        };

        Ok(Self {
            inner,
            limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// The wrapped client, for building requests.
    pub fn inner_client(&self) -> &ReqwestClient {
        &self.inner
    }

    pub async fn execute(&self, req: Request) -> Result<Response, ReqwestError> {
        self.limiter.until_ready().await;
        self.inner.execute(req).await
    }
}
