//! High-level client API for HDRezka
//!
//! Combines mirror failover, the login flow, the two search transports
//! and the detail/video resolvers behind one owned context object, so
//! no session or domain state lives in globals.

use reqwest::header::{HeaderMap, HeaderValue, COOKIE, REFERER};
use reqwest::StatusCode;
use serde::Deserialize;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

use crate::auth;
use crate::client::{ClientConfig, RezkaClient};
use crate::error::{Result, RezkaError};
use crate::mirror::select_mirror;
use crate::parser::{contains_login_form, parse_film_details, parse_search_results};
use crate::types::{FilmDetails, SearchResult, Session};
use crate::url::{build_relay_url, build_search_url};

/// JSON envelope returned by the pass-through relay
///
/// The relay always answers 200; the target site's own status travels
/// inside the envelope.
#[derive(Debug, Deserialize)]
struct RelayEnvelope {
    /// Raw HTML of the target page
    contents: String,
    /// Target-side response metadata (absent on some relay deployments)
    #[serde(default)]
    status: Option<RelayStatus>,
}

#[derive(Debug, Deserialize)]
struct RelayStatus {
    http_code: Option<u16>,
}

/// Client context for one HDRezka session
///
/// Created by [`RezkaScraper::connect`], which probes the mirror list
/// once and pins the first reachable base URL for the lifetime of the
/// value. Authentication is optional: [`search`](Self::search) needs a
/// logged-in session, [`search_public`](Self::search_public) goes
/// through the relay without one.
pub struct RezkaScraper {
    client: RezkaClient,
    base_url: String,
    relay_url: String,
    session: Option<Session>,
}

impl RezkaScraper {
    /// Connects using the default configuration
    ///
    /// # Errors
    /// `DomainsUnavailable` when no mirror answers its health probe.
    pub async fn connect() -> Result<Self> {
        Self::connect_with_config(ClientConfig::default()).await
    }

    /// Connects with a custom configuration
    ///
    /// Probes `config.mirrors` in order and caches the first live one;
    /// the selection is never revisited mid-session.
    pub async fn connect_with_config(config: ClientConfig) -> Result<Self> {
        let client = RezkaClient::with_config(&config)?;
        let base_url = select_mirror(&client, &config.mirrors).await?;

        Ok(Self {
            client,
            base_url,
            relay_url: config.relay_url,
            session: None,
        })
    }

    /// The mirror selected at connect time
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a valid session is currently held
    pub fn is_authenticated(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_valid)
    }

    /// Logs in against the selected mirror
    ///
    /// On success the session is stored and used by subsequent
    /// authenticated operations. A failed login invalidates any session
    /// held from before: a response without the session cookie means the
    /// server no longer vouches for this identity, so a previously valid
    /// session must not keep serving authenticated requests.
    ///
    /// # Errors
    /// [`RezkaError::Auth`] for every failure cause.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        match auth::login(&self.client, &self.base_url, username, password).await {
            Ok(session) => {
                self.session = Some(session);
                Ok(())
            }
            Err(e) => {
                if let Some(session) = self.session.as_mut() {
                    session.invalidate();
                }
                Err(e)
            }
        }
    }

    /// Searches the site over the authenticated transport
    ///
    /// # Errors
    /// - [`RezkaError::EmptyQuery`] for an empty or whitespace query
    /// - [`RezkaError::Auth`] without a valid session
    /// - [`RezkaError::AccessDenied`] on HTTP 403
    /// - [`RezkaError::SessionExpired`] when the response body carries
    ///   the login form; the held session is invalidated as a side
    ///   effect and no partial results are returned
    /// - [`RezkaError::NotFound`] when parsing yields zero results
    pub async fn search(&mut self, query: &str) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RezkaError::EmptyQuery);
        }

        let url = build_search_url(&self.base_url, query);
        let html = self.fetch_authenticated(&url).await?;

        let results = parse_search_results(&html, &self.base_url)?;
        if results.is_empty() {
            return Err(RezkaError::NotFound(query.to_string()));
        }

        debug!(count = results.len(), "search produced results");
        Ok(results)
    }

    /// Searches the site through the pass-through relay, no session
    /// required
    ///
    /// # Errors
    /// - [`RezkaError::EmptyQuery`] for an empty or whitespace query
    /// - [`RezkaError::Relay`] when the relay answers a non-200 status
    ///   or a malformed envelope
    /// - [`RezkaError::AccessDenied`] when the envelope reports a
    ///   target-side 403
    /// - [`RezkaError::NotFound`] when parsing yields zero results
    pub async fn search_public(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RezkaError::EmptyQuery);
        }

        let target = build_search_url(&self.base_url, query);
        let html = self.fetch_relayed(&target).await?;

        let results = parse_search_results(&html, &self.base_url)?;
        if results.is_empty() {
            return Err(RezkaError::NotFound(query.to_string()));
        }

        Ok(results)
    }

    /// Resolves the dub and quality choice lists for a film's detail
    /// page
    ///
    /// Uses the authenticated transport when a valid session is held
    /// (expired-session detection applies), the relay otherwise.
    pub async fn resolve_details(&mut self, film_url: &str) -> Result<FilmDetails> {
        let html = if self.is_authenticated() {
            self.fetch_authenticated(film_url).await?
        } else {
            self.fetch_relayed(film_url).await?
        };

        parse_film_details(&html)
    }

    /// Resolves a playable video URL for the chosen (film, translator,
    /// quality) triple
    ///
    /// Placeholder: the site's real stream API — token signing and
    /// per-session obfuscation included — is unresolved scope. This
    /// waits briefly and fabricates a synthetic URL from the inputs so
    /// the surrounding flow can be exercised end to end.
    // TODO: reverse-engineer the player/stream API and replace the
    // fabricated URL with a real resolution step.
    pub async fn resolve_video_url(
        &self,
        film_id: u64,
        translator_id: &str,
        quality: &str,
    ) -> Result<String> {
        if translator_id.trim().is_empty() {
            return Err(RezkaError::Resolution(
                "translator id cannot be empty".to_string(),
            ));
        }
        if quality.trim().is_empty() {
            return Err(RezkaError::Resolution("quality cannot be empty".to_string()));
        }

        sleep(Duration::from_millis(1500)).await;

        Ok(format!(
            "https://stream.example.invalid/video/{}/{}/{}.mp4",
            film_id, translator_id, quality
        ))
    }

    /// GET over the authenticated transport, with expired-session
    /// detection on the body
    async fn fetch_authenticated(&mut self, url: &str) -> Result<String> {
        let Some(session) = self.session.as_ref() else {
            return Err(RezkaError::Auth);
        };
        if !session.is_valid() {
            return Err(RezkaError::Auth);
        }

        let mut headers = HeaderMap::new();
        if let Ok(cookie) = HeaderValue::from_str(session.cookie_header()) {
            headers.insert(COOKIE, cookie);
        }
        if let Ok(referer) = HeaderValue::from_str(&self.base_url) {
            headers.insert(REFERER, referer);
        }

        let response = self.client.get(url, Some(headers)).await?;

        if response.status() == StatusCode::FORBIDDEN {
            return Err(RezkaError::AccessDenied);
        }

        let html = response.text().await.map_err(RezkaError::Http)?;

        // The site answers a dead session with the login page, on 200
        if contains_login_form(&html) {
            warn!("response carries the login form, session expired");
            if let Some(session) = self.session.as_mut() {
                session.invalidate();
            }
            return Err(RezkaError::SessionExpired);
        }

        Ok(html)
    }

    /// GET through the relay, unwrapping the JSON envelope
    async fn fetch_relayed(&self, target: &str) -> Result<String> {
        let url = build_relay_url(&self.relay_url, target);
        let response = self.client.get(&url, None).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RezkaError::Relay(format!("relay answered {}", status)));
        }

        let body = response.text().await.map_err(RezkaError::Http)?;
        let envelope: RelayEnvelope = serde_json::from_str(&body)
            .map_err(|e| RezkaError::Relay(e.to_string()))?;

        // The target's 403 arrives wrapped in a 200 envelope
        let target_code = envelope.status.and_then(|s| s.http_code);
        if target_code == Some(403) {
            return Err(RezkaError::AccessDenied);
        }

        Ok(envelope.contents)
    }
}
