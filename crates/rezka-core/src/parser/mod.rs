//! HTML parsers for HDRezka pages
//!
//! Pure functions over raw page bodies; the markup selectors are a
//! dependency on the site's current template and may break without
//! notice.

pub mod details;
pub mod search;

pub use details::parse_film_details;
pub use search::{contains_login_form, parse_search_results};
