//! Search results parser for HDRezka
//!
//! Extracts result records from the search page and detects the one
//! response shape that must never be mistaken for results: the login
//! form served to an expired session.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, RezkaError};
use crate::types::SearchResult;
use crate::url::{absolute_url, extract_film_id};

/// Checks whether a page body contains the site's login form
///
/// The site answers authenticated requests from a dead session with the
/// login page — on HTTP 200. Callers on the authenticated path must
/// treat a match as an expired session, not as an empty result set.
pub fn contains_login_form(html: &str) -> bool {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse(r#"form[action*="login"]"#) else {
        return false;
    };
    document.select(&selector).next().is_some()
}

/// Parses the search results page into a list of [`SearchResult`]s
///
/// Result cards are `.b-content__inline_item` nodes. A card yields a
/// result only when both its `.title` element and a link are present;
/// cards missing either are skipped silently. Relative links are
/// resolved against the selected mirror.
///
/// An empty vec is a valid outcome here — mapping it to "not found" is
/// the caller's concern.
pub fn parse_search_results(html: &str, base: &str) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);

    let card_selector = Selector::parse(".b-content__inline_item")
        .map_err(|e| RezkaError::Parse(format!("Invalid selector: {:?}", e)))?;

    let mut results = Vec::new();

    for element in document.select(&card_selector) {
        if let Some(result) = parse_result_card(&element, base) {
            results.push(result);
        }
    }

    Ok(results)
}

/// Parses a single result card, returning `None` when the card lacks a
/// title or a link
fn parse_result_card(element: &ElementRef, base: &str) -> Option<SearchResult> {
    let title_selector = Selector::parse(".title").ok()?;
    let title = element
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())?;

    if title.is_empty() {
        return None;
    }

    let link_selector = Selector::parse("a[href]").ok()?;
    let href = element
        .select(&link_selector)
        .next()
        .and_then(|el| el.value().attr("href"))?;

    let url = absolute_url(base, href);
    let film_id = extract_film_id(&url);

    Some(SearchResult {
        title,
        url,
        film_id,
    })
}
