//! URL helper functions for HDRezka mirrors
//!
//! Because the base address is chosen at runtime by mirror failover,
//! every builder takes the selected mirror explicitly.

use regex::Regex;

/// Builds the liveness-probe URL for a mirror candidate
///
/// # Example
/// ```
/// use rezka_core::url::build_health_url;
/// let url = build_health_url("https://hdrezka.example");
/// assert_eq!(url, "https://hdrezka.example/healthcheck");
/// ```
pub fn build_health_url(mirror: &str) -> String {
    format!("{}/healthcheck", mirror.trim_end_matches('/'))
}

/// Builds the login page URL for the selected mirror
///
/// The same address serves both the CSRF-bearing form (GET) and the
/// credential submission (POST).
pub fn build_login_url(base: &str) -> String {
    format!("{}/login/", base.trim_end_matches('/'))
}

/// Builds the search URL for a given query
///
/// # Example
/// ```
/// use rezka_core::url::build_search_url;
/// let url = build_search_url("https://hdrezka.example", "доктор кто");
/// assert_eq!(
///     url,
///     "https://hdrezka.example/search/?do=search&subaction=search&q=%D0%B4%D0%BE%D0%BA%D1%82%D0%BE%D1%80%20%D0%BA%D1%82%D0%BE"
/// );
/// ```
pub fn build_search_url(base: &str, query: &str) -> String {
    let encoded = urlencoding::encode(query);
    format!(
        "{}/search/?do=search&subaction=search&q={}",
        base.trim_end_matches('/'),
        encoded
    )
}

/// Wraps a target URL into a pass-through relay request
///
/// The relay answers a JSON envelope whose `contents` field holds the
/// target page body.
///
/// # Example
/// ```
/// use rezka_core::url::build_relay_url;
/// let url = build_relay_url("https://relay.example", "https://hdrezka.example/search/?q=a");
/// assert_eq!(
///     url,
///     "https://relay.example/get?url=https%3A%2F%2Fhdrezka.example%2Fsearch%2F%3Fq%3Da"
/// );
/// ```
pub fn build_relay_url(relay: &str, target: &str) -> String {
    let encoded = urlencoding::encode(target);
    format!("{}/get?url={}", relay.trim_end_matches('/'), encoded)
}

/// Extracts the numeric film id from a detail-page URL
///
/// Detail pages end in `/{id}-{slug}.html`; anything else yields `None`.
///
/// # Example
/// ```
/// use rezka_core::url::extract_film_id;
/// assert_eq!(
///     extract_film_id("https://hdrezka.example/films/12345-some-title.html"),
///     Some(12345)
/// );
/// ```
pub fn extract_film_id(url: &str) -> Option<u64> {
    let re = Regex::new(r"/(\d+)-[^/]+\.html$").ok()?;
    let caps = re.captures(url)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Resolves a possibly relative href against the selected mirror
pub fn absolute_url(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            href.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_build_health_url() {
        assert_eq!(
            build_health_url("https://hdrezka.example/"),
            "https://hdrezka.example/healthcheck"
        );
    }

    #[test]
    fn test_build_login_url() {
        assert_eq!(
            build_login_url("https://hdrezka.example"),
            "https://hdrezka.example/login/"
        );
    }

    #[test]
    fn test_build_search_url_simple() {
        let url = build_search_url("https://hdrezka.example", "dune");
        assert_eq!(
            url,
            "https://hdrezka.example/search/?do=search&subaction=search&q=dune"
        );
    }

    #[test]
    fn test_build_search_url_with_spaces() {
        let url = build_search_url("https://hdrezka.example", "doctor who");
        assert_eq!(
            url,
            "https://hdrezka.example/search/?do=search&subaction=search&q=doctor%20who"
        );
    }

    #[test]
    fn test_build_relay_url_encodes_target() {
        let url = build_relay_url(
            "https://relay.example",
            "https://hdrezka.example/search/?do=search&q=dune",
        );
        assert!(url.starts_with("https://relay.example/get?url="));
        assert!(url.contains("%3A%2F%2F"));
        assert!(!url[30..].contains('&'));
    }

    #[test]
    fn test_extract_film_id() {
        assert_eq!(
            extract_film_id("https://hdrezka.example/films/12345-some-title.html"),
            Some(12345)
        );
    }

    #[test]
    fn test_extract_film_id_relative_path() {
        assert_eq!(extract_film_id("/series/777-long-night.html"), Some(777));
    }

    #[test]
    fn test_extract_film_id_rejects_non_detail_urls() {
        assert_eq!(extract_film_id("https://hdrezka.example/login/"), None);
        assert_eq!(extract_film_id("https://hdrezka.example/films/abc-title.html"), None);
        assert_eq!(extract_film_id("https://hdrezka.example/12345-title"), None);
    }

    #[test]
    fn test_extract_film_id_requires_trailing_segment() {
        // Digits not in the final path segment must not match
        assert_eq!(
            extract_film_id("https://hdrezka.example/123-old/title.html"),
            None
        );
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https://hdrezka.example", "/films/1-a.html"),
            "https://hdrezka.example/films/1-a.html"
        );
        assert_eq!(
            absolute_url("https://hdrezka.example/", "https://other.example/x"),
            "https://other.example/x"
        );
    }

    proptest! {
        #[test]
        fn prop_extract_film_id_roundtrip(id in 0u64..=u64::from(u32::MAX), slug in "[a-z][a-z0-9-]{0,30}") {
            let url = format!("https://hdrezka.example/films/{}-{}.html", id, slug);
            prop_assert_eq!(extract_film_id(&url), Some(id));
        }

        #[test]
        fn prop_extract_film_id_never_panics(url in "\\PC*") {
            let _ = extract_film_id(&url);
        }
    }
}
