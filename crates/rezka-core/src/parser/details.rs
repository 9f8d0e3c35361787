//! Detail page parser for HDRezka
//!
//! Extracts the dub/voiceover and quality choice lists from a film's
//! detail page. Options are identified by `data-translator_id` and
//! `data-quality` attributes on the player controls.

use scraper::{Html, Selector};

use crate::error::{Result, RezkaError};
use crate::types::{FilmDetails, QualityOption, TranslationOption};

/// Parses a film detail page into its choice lists
///
/// Option nodes without an identifier attribute are skipped silently;
/// so are nodes whose identifier is present but empty — an empty id
/// cannot address anything on the site, and including one would make
/// the default selection unusable. The first surviving option of each
/// list, in document order, is flagged as the default.
pub fn parse_film_details(html: &str) -> Result<FilmDetails> {
    let document = Html::parse_document(html);

    let translator_selector = Selector::parse("[data-translator_id]")
        .map_err(|e| RezkaError::Parse(format!("Invalid selector: {:?}", e)))?;
    let quality_selector = Selector::parse("[data-quality]")
        .map_err(|e| RezkaError::Parse(format!("Invalid selector: {:?}", e)))?;

    let mut translations = Vec::new();
    for element in document.select(&translator_selector) {
        let Some(id) = element.value().attr("data-translator_id") else {
            continue;
        };
        if id.is_empty() {
            continue;
        }

        let text = element.text().collect::<String>().trim().to_string();
        let name = if text.is_empty() { id.to_string() } else { text };

        translations.push(TranslationOption {
            id: id.to_string(),
            name,
            is_default: translations.is_empty(),
        });
    }

    let mut qualities = Vec::new();
    for element in document.select(&quality_selector) {
        let Some(value) = element.value().attr("data-quality") else {
            continue;
        };
        if value.is_empty() {
            continue;
        }

        let text = element.text().collect::<String>().trim().to_string();
        let label = if text.is_empty() {
            value.to_string()
        } else {
            text
        };

        qualities.push(QualityOption {
            value: value.to_string(),
            label,
            is_default: qualities.is_empty(),
        });
    }

    Ok(FilmDetails {
        translations,
        qualities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translator_and_quality_options() {
        let html = r#"
        <html><body>
        <ul class="b-translators__list">
            <li data-translator_id="238">Дубляж</li>
            <li data-translator_id="56">Оригинал</li>
        </ul>
        <ul class="b-player__qualities">
            <li data-quality="720p">720p</li>
            <li data-quality="1080p">1080p Ultra</li>
        </ul>
        </body></html>
        "#;

        let details = parse_film_details(html).unwrap();

        assert_eq!(details.translations.len(), 2);
        assert_eq!(details.translations[0].id, "238");
        assert_eq!(details.translations[0].name, "Дубляж");
        assert!(details.translations[0].is_default);
        assert!(!details.translations[1].is_default);

        assert_eq!(details.qualities.len(), 2);
        assert_eq!(details.qualities[0].value, "720p");
        assert!(details.qualities[0].is_default);
        assert_eq!(details.qualities[1].label, "1080p Ultra");
        assert!(!details.qualities[1].is_default);
    }

    #[test]
    fn test_node_without_identifier_is_excluded() {
        let html = r#"
        <ul>
            <li class="b-translator__item">Безымянный</li>
            <li data-translator_id="7">Названный</li>
        </ul>
        "#;

        let details = parse_film_details(html).unwrap();
        assert_eq!(details.translations.len(), 1);
        assert_eq!(details.translations[0].id, "7");
        assert!(details.translations[0].is_default);
    }

    #[test]
    fn test_empty_identifier_is_excluded() {
        // Present-but-empty identifiers are treated like missing ones:
        // the next option with a real id becomes the default
        let html = r#"
        <ul>
            <li data-translator_id="">Пустой</li>
            <li data-translator_id="9">Настоящий</li>
        </ul>
        <ul>
            <li data-quality="">?</li>
            <li data-quality="480p">480p</li>
        </ul>
        "#;

        let details = parse_film_details(html).unwrap();

        assert_eq!(details.translations.len(), 1);
        assert_eq!(details.translations[0].id, "9");
        assert!(details.translations[0].is_default);

        assert_eq!(details.qualities.len(), 1);
        assert_eq!(details.qualities[0].value, "480p");
        assert!(details.qualities[0].is_default);
    }

    #[test]
    fn test_name_falls_back_to_identifier() {
        let html = r#"<li data-translator_id="111"></li>"#;
        let details = parse_film_details(html).unwrap();
        assert_eq!(details.translations[0].name, "111");
    }

    #[test]
    fn test_page_without_options() {
        // Single-voiceover titles carry no translator markers at all
        let html = "<html><body><h1>Фильм</h1></body></html>";
        let details = parse_film_details(html).unwrap();
        assert!(details.translations.is_empty());
        assert!(details.qualities.is_empty());
    }

    #[test]
    fn test_document_order_is_preserved() {
        let html = r#"
        <div data-quality="1080p">1080p</div>
        <div data-quality="360p">360p</div>
        <div data-quality="720p">720p</div>
        "#;

        let details = parse_film_details(html).unwrap();
        let values: Vec<&str> = details.qualities.iter().map(|q| q.value.as_str()).collect();
        assert_eq!(values, vec!["1080p", "360p", "720p"]);
    }
}
