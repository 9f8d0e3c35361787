//! Mirror failover for HDRezka
//!
//! The site rotates blocked domains; clients carry an ordered candidate
//! list and pick the first one that answers its health endpoint. The
//! choice is made once, at startup, and cached for the whole session.

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::client::RezkaClient;
use crate::error::{Result, RezkaError};
use crate::url::build_health_url;

/// Compiled-in mirror candidates, probed in order
pub const DEFAULT_MIRRORS: &[&str] = &[
    "https://hdrezka2vbppy.org",
    "https://rezka.ag",
];

/// Selects the first reachable mirror from an ordered candidate list
///
/// Each candidate gets a single HEAD probe against `/healthcheck`,
/// bounded by the client's probe timeout. Only HTTP 200 counts as
/// alive; a timeout, connection error or any other status moves on to
/// the next candidate. No candidate is probed twice.
///
/// # Errors
/// `DomainsUnavailable` when every candidate fails its probe.
pub async fn select_mirror(client: &RezkaClient, mirrors: &[String]) -> Result<String> {
    for mirror in mirrors {
        match client.probe_head(&build_health_url(mirror)).await {
            Ok(StatusCode::OK) => {
                debug!(mirror = %mirror, "mirror selected");
                return Ok(mirror.clone());
            }
            Ok(status) => {
                warn!(mirror = %mirror, status = %status, "mirror probe answered non-200");
            }
            Err(e) => {
                warn!(mirror = %mirror, error = %e, "mirror probe failed");
            }
        }
    }

    Err(RezkaError::DomainsUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_selects_first_live_mirror_and_stops() {
        let dead = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/healthcheck"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&dead)
            .await;

        let live = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/healthcheck"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&live)
            .await;

        // Must never be probed once a live mirror is found
        let spare = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/healthcheck"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&spare)
            .await;

        let client = RezkaClient::new().unwrap();
        let mirrors = vec![dead.uri(), live.uri(), spare.uri()];

        let selected = select_mirror(&client, &mirrors).await.unwrap();
        assert_eq!(selected, live.uri());
    }

    #[tokio::test]
    async fn test_unreachable_candidate_falls_through() {
        let live = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/healthcheck"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&live)
            .await;

        // Nothing listens on this port
        let mirrors = vec!["http://127.0.0.1:1".to_string(), live.uri()];

        let client = RezkaClient::new().unwrap();
        let selected = select_mirror(&client, &mirrors).await.unwrap();
        assert_eq!(selected, live.uri());
    }

    #[tokio::test]
    async fn test_all_mirrors_down() {
        let dead = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/healthcheck"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&dead)
            .await;

        let client = RezkaClient::new().unwrap();
        let mirrors = vec![dead.uri(), "http://127.0.0.1:1".to_string()];

        let result = select_mirror(&client, &mirrors).await;
        match result {
            Err(RezkaError::DomainsUnavailable) => {}
            other => panic!("Expected DomainsUnavailable, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_empty_mirror_list() {
        let client = RezkaClient::new().unwrap();
        let result = select_mirror(&client, &[]).await;
        assert!(matches!(result, Err(RezkaError::DomainsUnavailable)));
    }
}
