//! Debug script to inspect the search page markup of a live mirror
//!
//! The result-card selectors track the site's current template; when
//! parsing starts returning nothing, run this to eyeball the markup.

use rezka_core::{parse_search_results, ClientConfig, RezkaClient, select_mirror, url};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::default();
    let client = RezkaClient::with_config(&config)?;
    let base = select_mirror(&client, &config.mirrors).await?;

    let search_url = url::build_search_url(&base, "Интерстеллар");
    println!("Fetching {search_url}...\n");

    let html = client.get(&search_url, None).await?.text().await?;

    // Save HTML to file for inspection
    std::fs::write("debug_search.html", &html)?;
    println!("HTML saved to debug_search.html");

    let results = parse_search_results(&html, &base)?;
    println!("Parsed {} result card(s)", results.len());
    for result in results.iter().take(10) {
        println!("  {} -> {:?}", result.title, result.film_id);
    }

    Ok(())
}
