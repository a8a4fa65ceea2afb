//! Single-page rendering for the `docsite show` command.

use anyhow::Result;
use docsite_core::loader::PageLoader;
use docsite_core::PageKey;

use crate::config::Config;
use crate::content::build_source;

/// What `docsite show` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFormat {
    Html,
    Toc,
    Markdown,
}

/// CLI entry point: loads one page and prints it to stdout.
///
/// Unknown keys and load failures are returned as errors; re-running the
/// command is the retry.
pub async fn run_show(config: &Config, key: &str, format: ShowFormat) -> Result<()> {
    let source = build_source(config)?;
    let page: PageKey = key.parse()?;

    if format == ShowFormat::Markdown {
        print!("{}", source.fetch(page).await?);
        return Ok(());
    }

    let loader = PageLoader::new(source);
    let rendered = loader.load(page).await?;

    match format {
        ShowFormat::Toc => {
            if rendered.toc.is_empty() {
                println!("No headings found");
            }
            for entry in &rendered.toc {
                let indent = "  ".repeat(entry.level.saturating_sub(1) as usize);
                println!("{}{} (#{})", indent, entry.text, entry.anchor);
            }
        }
        _ => print!("{}", rendered.html),
    }

    Ok(())
}
