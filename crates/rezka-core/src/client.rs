//! HTTP client plumbing for HDRezka mirrors
//!
//! Wraps `reqwest` with request spacing, bounded timeouts and a fixed
//! browser identity. Redirects are never followed: the login flow must
//! inspect raw 302 responses, and an expired session is detected from
//! the response body rather than the redirect chain.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{Response, StatusCode};

use crate::error::{Result, RezkaError};
use crate::mirror::DEFAULT_MIRRORS;

/// Browser identity sent with every request; the site serves a reduced
/// template to unknown agents
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default pass-through relay for the unauthenticated transport
pub const DEFAULT_RELAY_URL: &str = "https://api.allorigins.win";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Per-probe timeout for mirror liveness checks in seconds (default: 5)
    pub probe_timeout_secs: u64,
    /// Ordered mirror candidates probed at startup
    pub mirrors: Vec<String>,
    /// Relay endpoint for unauthenticated fetches
    pub relay_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 2.0,
            timeout_secs: 30,
            probe_timeout_secs: 5,
            mirrors: DEFAULT_MIRRORS.iter().map(|m| m.to_string()).collect(),
            relay_url: DEFAULT_RELAY_URL.to_string(),
        }
    }
}

/// Rate limiter to control request frequency
///
/// Ensures requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second);
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(Instant::now() - min_interval)),
        }
    }

    /// Acquire permission to make a request, sleeping out the remainder
    /// of the interval if called too soon
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// HTTP client wrapper used by every operation
///
/// No automatic retry happens anywhere: a failed operation is reported
/// and the caller decides whether to trigger it again.
pub struct RezkaClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
    probe_timeout: Duration,
}

impl RezkaClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .default_headers({
                let mut headers = HeaderMap::new();
                headers.insert(
                    ACCEPT_LANGUAGE,
                    HeaderValue::from_static("ru-RU,ru;q=0.9,en;q=0.8"),
                );
                headers
            })
            .build()
            .map_err(RezkaError::Http)?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
        })
    }

    /// Lightweight liveness probe: HEAD request bounded by the probe
    /// timeout, returning only the status code
    ///
    /// Probes bypass the rate limiter — they run once, before any
    /// scraping traffic.
    pub async fn probe_head(&self, url: &str) -> Result<StatusCode> {
        let response = self
            .client
            .head(url)
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(RezkaError::Http)?;

        Ok(response.status())
    }

    /// GET a page, optionally with extra per-request headers
    ///
    /// Returns the raw response so callers can inspect status and
    /// headers before consuming the body.
    pub async fn get(&self, url: &str, headers: Option<HeaderMap>) -> Result<Response> {
        self.rate_limiter.acquire().await;

        let mut request = self.client.get(url);
        if let Some(headers) = headers {
            request = request.headers(headers);
        }

        request.send().await.map_err(RezkaError::Http)
    }

    /// POST a form-encoded body, optionally with extra headers
    ///
    /// Redirects are not followed, so the raw response (including its
    /// `Set-Cookie` headers) is returned as the server produced it.
    pub async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        self.rate_limiter.acquire().await;

        let mut request = self.client.post(url).form(form);
        if let Some(headers) = headers {
            request = request.headers(headers);
        }

        request.send().await.map_err(RezkaError::Http)
    }

    /// Get a reference to the rate limiter (for testing)
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_creation() {
        let limiter = RateLimiter::new(2.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_rate_limiter_interval_calculation() {
        let limiter = RateLimiter::new(4.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.requests_per_second, 2.0);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.probe_timeout_secs, 5);
        assert!(!config.mirrors.is_empty());
        assert_eq!(config.relay_url, DEFAULT_RELAY_URL);
    }

    #[test]
    fn test_client_creation() {
        let client = RezkaClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_custom_config() {
        let config = ClientConfig {
            requests_per_second: 1.0,
            timeout_secs: 60,
            probe_timeout_secs: 2,
            mirrors: vec!["https://mirror.example".to_string()],
            relay_url: "https://relay.example".to_string(),
        };
        let client = RezkaClient::with_config(&config);
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_rate_limiter_acquire() {
        let limiter = RateLimiter::new(10.0); // 100ms interval

        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        let elapsed = start.elapsed();

        // Second acquire should wait at least 100ms
        assert!(elapsed >= Duration::from_millis(90)); // Allow small tolerance
    }
}
