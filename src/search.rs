//! CLI entry points for searching and inspecting the section index.

use anyhow::Result;
use docsite_core::index::build_index_from_source;
use docsite_core::nav::page_href;
use docsite_core::query;
use docsite_core::PageKey;
use std::collections::BTreeMap;

use crate::app::DocsApp;
use crate::config::Config;
use crate::content::build_source;

pub async fn run_search(config: &Config, query_text: &str, json: bool) -> Result<()> {
    if !query::is_searchable(query_text) {
        if json {
            println!("[]");
        } else {
            println!("No results.");
        }
        return Ok(());
    }

    let app = DocsApp::new(config.clone()).await?;
    let results = app.search(query_text);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        let section = &result.section;
        println!(
            "{}. [{}] {} / {}",
            i + 1,
            result.score,
            section.page.title(),
            section.title
        );
        println!("    page: {} (section {})", section.page, section.ordinal);
        println!("    link: {}", page_href(section.page));
        println!("    excerpt: \"{}\"", section.preview);
        println!();
    }

    Ok(())
}

/// Build the index and print a per-page summary, or every record as JSON.
pub async fn run_index(config: &Config, json: bool) -> Result<()> {
    let source = build_source(config)?;
    let build = build_index_from_source(source.as_ref()).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&build.records)?);
        return Ok(());
    }

    let mut per_page: BTreeMap<PageKey, usize> = BTreeMap::new();
    for record in &build.records {
        *per_page.entry(record.page).or_default() += 1;
    }

    println!("{:<14} SECTIONS", "PAGE");
    for (page, count) in &per_page {
        println!("{:<14} {}", page.as_str(), count);
    }
    println!();
    println!("{} sections indexed.", build.records.len());

    if !build.skipped.is_empty() {
        println!("{} pages skipped:", build.skipped.len());
        for skipped in &build.skipped {
            println!("  {}", skipped);
        }
    }

    Ok(())
}
