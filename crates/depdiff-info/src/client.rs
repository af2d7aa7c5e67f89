//! HTTP client wrapper with rate limiting

use crate::error::{Error, Result};
use governor::{Quota, RateLimiter};
use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Rate limiter shared by all requests of one client
pub type ApiRateLimiter = Arc<
    RateLimiter<governor::state::NotKeyed, governor::state::InMemoryState, governor::clock::DefaultClock>,
>;

/// HTTP client wrapper for API requests with optional rate limiting
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    rate_limiter: Option<ApiRateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration (no rate limiting)
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            rate_limiter: None,
        })
    }

    /// Create a new HTTP client allowing at most `requests_per_second`
    ///
    /// A value of zero is treated as one.
    pub fn with_rate_limit(requests_per_second: u32) -> Result<Self> {
        let per_second = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second)));

        Ok(Self {
            client: build_client()?,
            rate_limiter: Some(rate_limiter),
        })
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }
    }

    /// GET a URL and return only its status
    ///
    /// HTTP 429 is reported as [`Error::RateLimitExceeded`]; every other
    /// status is returned to the caller to interpret.
    pub async fn get_status(&self, url: &str) -> Result<StatusCode> {
        self.wait_for_rate_limit().await;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(url, "rate limited");
            return Err(Error::RateLimitExceeded(url.to_string()));
        }
        Ok(status)
    }

    /// POST a JSON body and deserialize the JSON response
    pub async fn post_json<B, T>(&self, url: &str, headers: HeaderMap, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.wait_for_rate_limit().await;

        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await?;
        let response = check_status(response, url)?;
        Ok(response.json().await?)
    }

    /// PATCH a JSON body and deserialize the JSON response
    pub async fn patch_json<B, T>(&self, url: &str, headers: HeaderMap, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.wait_for_rate_limit().await;

        let response = self
            .client
            .patch(url)
            .headers(headers)
            .json(body)
            .send()
            .await?;
        let response = check_status(response, url)?;
        Ok(response.json().await?)
    }
}

fn build_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(format!("depdiff/{}", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()?)
}

fn check_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!(url, "rate limited");
        return Err(Error::RateLimitExceeded(url.to_string()));
    }
    if !status.is_success() {
        return Err(Error::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response)
}
