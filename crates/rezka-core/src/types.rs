//! Core data types for the HDRezka client

use serde::{Deserialize, Serialize};

/// A title found by search
///
/// One record per matching result card on the search page. The numeric
/// film id is derived from the detail-page address and may be absent when
/// the link does not follow the usual `/{id}-{slug}.html` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Display title of the film
    pub title: String,

    /// Absolute URL of the detail page
    pub url: String,

    /// Numeric film id parsed from the trailing `/{id}-{slug}.html`
    /// segment of the detail-page URL
    pub film_id: Option<u64>,
}

/// A dub/voiceover track choice on a detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationOption {
    /// Translator id as carried by the `data-translator_id` attribute
    pub id: String,

    /// Display name of the voiceover track
    pub name: String,

    /// True for the first option in document order
    pub is_default: bool,
}

/// A quality/resolution choice on a detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityOption {
    /// Machine value as carried by the `data-quality` attribute
    pub value: String,

    /// Display label (falls back to the machine value)
    pub label: String,

    /// True for the first option in document order
    pub is_default: bool,
}

/// Choice lists extracted from a film detail page
///
/// Either list may be empty; single-voiceover titles carry no
/// translator markers at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmDetails {
    pub translations: Vec<TranslationOption>,
    pub qualities: Vec<QualityOption>,
}

/// An authenticated identity on the selected mirror
///
/// Created by a successful login and held only in memory. The cookie
/// blob is sent verbatim as the `Cookie` header on authenticated
/// requests. Validity flips to false the moment a response betrays a
/// silently expired session; it never flips back by itself.
#[derive(Debug, Clone)]
pub struct Session {
    cookie_header: String,
    valid: bool,
}

impl Session {
    /// Creates a valid session from the login response's cookie pairs
    pub(crate) fn authenticated(cookie_header: String) -> Self {
        Self {
            cookie_header,
            valid: true,
        }
    }

    /// Whether the session is still believed to be valid
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Cookie header blob to attach to authenticated requests
    pub fn cookie_header(&self) -> &str {
        &self.cookie_header
    }

    /// Marks the session as expired
    pub(crate) fn invalidate(&mut self) {
        self.valid = false;
    }
}
