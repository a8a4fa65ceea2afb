use anyhow::Result;
use docsite_core::PageKey;

use crate::config::Config;
use crate::content::build_source;

/// Print every page with its title and whether the content source can serve it.
pub async fn list_pages(config: &Config) -> Result<()> {
    let source = build_source(config)?;
    let served = source.pages();

    println!("source: {} ({})", source.name(), config.content.mode);
    println!("{:<14} {:<26} STATUS", "PAGE", "TITLE");

    for page in PageKey::ALL {
        let status = if !served.contains(&page) {
            "NOT CONFIGURED".to_string()
        } else {
            match source.fetch(page).await {
                Ok(text) => format!("OK ({} bytes)", text.len()),
                Err(e) => format!("UNAVAILABLE ({})", e),
            }
        };
        println!("{:<14} {:<26} {}", page.as_str(), page.title(), status);
    }

    Ok(())
}
