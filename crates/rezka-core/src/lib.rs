//! HDRezka Client Core Library
//!
//! Async client for searching HDRezka mirrors, logging in, and picking a
//! dub/quality for a selected title.
//!
//! # Overview
//!
//! The site rotates its domains, gates search behind a session on some
//! mirrors, and serves everything as server-rendered HTML, so the crate
//! combines:
//! - Mirror failover: the candidate list is probed once at startup and
//!   the first live mirror is pinned for the session
//! - A login flow that scrapes the CSRF token and validates the session
//!   cookie, with body-based expired-session detection afterwards
//! - Two search transports: direct (authenticated) and through a
//!   pass-through relay (no session)
//! - HTML parsers for search result cards and detail-page option lists
//!
//! # Example
//!
//! ```no_run
//! use rezka_core::{Result, RezkaScraper};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut scraper = RezkaScraper::connect().await?;
//!
//!     scraper.login("user", "password").await?;
//!
//!     let results = scraper.search("Интерстеллар").await?;
//!     for film in &results {
//!         println!("{}: {}", film.title, film.url);
//!     }
//!
//!     if let Some(film) = results.first() {
//!         let details = scraper.resolve_details(&film.url).await?;
//!         if let (Some(t), Some(q), Some(id)) = (
//!             details.translations.first(),
//!             details.qualities.first(),
//!             film.film_id,
//!         ) {
//!             let url = scraper.resolve_video_url(id, &t.id, &q.value).await?;
//!             println!("Video URL: {}", url);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Video resolution
//!
//! [`RezkaScraper::resolve_video_url`] is a placeholder: the site's real
//! stream API (token signing, per-session obfuscation) is unresolved
//! scope, and the method fabricates a synthetic URL so the surrounding
//! flow can be exercised. Do not ship it as a working resolver.

mod auth;
mod client;
mod error;
mod mirror;
pub mod parser;
mod scraper;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, RateLimiter, RezkaClient, DEFAULT_RELAY_URL};

// Re-export error types
pub use error::{Result, RezkaError};

// Re-export the login flow and mirror failover
pub use auth::login;
pub use mirror::{select_mirror, DEFAULT_MIRRORS};

// Re-export parser functions
pub use parser::{contains_login_form, parse_film_details, parse_search_results};

// Re-export the main client API
pub use scraper::RezkaScraper;

// Re-export data types
pub use types::{FilmDetails, QualityOption, SearchResult, Session, TranslationOption};

// Re-export URL helpers for convenience
pub use url::{build_search_url, extract_film_id};
