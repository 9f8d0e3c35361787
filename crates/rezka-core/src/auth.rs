//! Credential login against the selected mirror
//!
//! The site runs DataLife Engine: the login form carries an optional
//! CSRF token, and a successful POST answers with a `dle_user_id`
//! cookie. Redirects are never followed here — the raw response and its
//! `Set-Cookie` headers are what decide success.

use reqwest::header::{HeaderMap, HeaderValue, REFERER, SET_COOKIE};
use regex::Regex;
use tracing::{debug, warn};

use crate::client::RezkaClient;
use crate::error::{Result, RezkaError};
use crate::types::Session;
use crate::url::build_login_url;

/// Cookie that signals an authenticated DLE session
const SESSION_COOKIE: &str = "dle_user_id";

/// Scrapes the CSRF token from the raw login page body
///
/// The token lives in an `<input name="csrf_token" value="...">` field.
/// Some mirrors omit it entirely, and the site tolerates an empty token,
/// so a missing field degrades softly to `""`.
pub(crate) fn extract_csrf_token(html: &str) -> String {
    let Ok(re) = Regex::new(r#"(?i)<input[^>]*name="csrf_token"[^>]*value="([^"]*)""#) else {
        return String::new();
    };

    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Collects cookie name=value pairs from a response's Set-Cookie headers
///
/// Attributes (`Path`, `HttpOnly`, ...) are dropped; only the leading
/// pair of each header survives, joined into one `Cookie` header blob.
fn collect_cookie_pairs(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .map(|pair| pair.trim().to_string())
        .filter(|pair| !pair.is_empty())
        .collect()
}

/// Logs in and returns a valid [`Session`]
///
/// Fetches the login page, scrapes the CSRF token, then submits the
/// credentials form-encoded with the token in `X-CSRF-Token`. Success
/// is decided solely by the presence of a `dle_user_id` cookie in the
/// response.
///
/// # Errors
/// Every failure cause — wrong credentials, network failure, a missing
/// session cookie, a server error — surfaces as the single generic
/// [`RezkaError::Auth`]; causes are distinguished only in trace output.
pub async fn login(
    client: &RezkaClient,
    base: &str,
    username: &str,
    password: &str,
) -> Result<Session> {
    let login_url = build_login_url(base);

    let page = match client.get(&login_url, None).await {
        Ok(response) => response.text().await.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "failed to fetch login page");
            return Err(RezkaError::Auth);
        }
    };

    let csrf_token = extract_csrf_token(&page);
    if csrf_token.is_empty() {
        debug!("login page carries no csrf token, submitting without one");
    }

    let mut headers = HeaderMap::new();
    if let Ok(token) = HeaderValue::from_str(&csrf_token) {
        headers.insert("X-CSRF-Token", token);
    }
    if let Ok(referer) = HeaderValue::from_str(&login_url) {
        headers.insert(REFERER, referer);
    }

    let form = [
        ("login_name", username),
        ("login_password", password),
        ("login_not_save", "0"),
        ("login", "submit"),
    ];

    let response = match client.post_form(&login_url, &form, Some(headers)).await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "login request failed");
            return Err(RezkaError::Auth);
        }
    };

    let cookies = collect_cookie_pairs(response.headers());
    let authenticated = cookies
        .iter()
        .any(|pair| pair.starts_with(&format!("{SESSION_COOKIE}=")));

    if !authenticated {
        warn!(
            status = %response.status(),
            "login response carries no session cookie"
        );
        return Err(RezkaError::Auth);
    }

    debug!("login succeeded");
    Ok(Session::authenticated(cookies.join("; ")))
}
