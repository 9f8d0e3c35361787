//! Relay-based search demo: no credentials needed
//!
//! Usage: cargo run --example public_search -- "Интерстеллар"

use rezka_core::RezkaScraper;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let query = std::env::args().nth(1).unwrap_or_else(|| "Интерстеллар".to_string());

    println!("Probing mirrors...");
    let scraper = RezkaScraper::connect().await?;
    println!("Using mirror: {}\n", scraper.base_url());

    let results = scraper.search_public(&query).await?;
    for film in &results {
        match film.film_id {
            Some(id) => println!("[{}] {} — {}", id, film.title, film.url),
            None => println!("[?] {} — {}", film.title, film.url),
        }
    }

    Ok(())
}
