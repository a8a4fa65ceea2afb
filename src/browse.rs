//! Interactive terminal browser.
//!
//! A line-oriented session over [`DocsApp`]: colon commands navigate between
//! pages and anything else is run as a search query.
//!
//! ```text
//! docs> :open api
//! docs> authentication
//! docs> :back
//! ```

use anyhow::Result;
use docsite_core::models::RenderedPage;
use docsite_core::query;
use docsite_core::DocsError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

use crate::app::DocsApp;
use crate::config::Config;

const PROMPT: &str = "docs> ";

const HELP: &str = "\
Commands:
  :open <page>   open a page (:o)
  :back          previous page (:b)
  :forward       next page (:f)
  :retry         re-attempt the last failed page (:r)
  :toc           table of contents of the current page
  :pages         list all pages
  :theme         toggle light/dark
  :rebuild       rebuild the search index
  :help          this text (:h)
  :quit          exit (:q)
Anything else is searched.";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Open(String),
    Back,
    Forward,
    Retry,
    Toc,
    Pages,
    Theme,
    Rebuild,
    Help,
    Quit,
    Search(String),
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Search(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "open" | "o" if !arg.is_empty() => Command::Open(arg.to_string()),
        "back" | "b" => Command::Back,
        "forward" | "f" => Command::Forward,
        "retry" | "r" => Command::Retry,
        "toc" => Command::Toc,
        "pages" => Command::Pages,
        "theme" => Command::Theme,
        "rebuild" => Command::Rebuild,
        "help" | "h" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

pub async fn run_browse(config: &Config) -> Result<()> {
    let app = DocsApp::new(config.clone()).await?;
    let mut rl = DefaultEditor::new()?;

    println!("Itsriober docs ({} pages). Type :help for commands.", app.source().pages().len());
    println!("Theme: {}", app.theme());
    print_page(app.open(app.current_page()).await);

    // Key of the last `:open` that failed; `:retry` re-attempts it.
    let mut failed_key: Option<String> = None;

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }

        match parse_command(&line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Open(key) => {
                let result = app.open_key(&key).await;
                failed_key = result.is_err().then_some(key);
                print_page(result);
            }
            Command::Back => match app.back().await {
                Some(result) => print_page(result),
                None => println!("Already at the oldest page."),
            },
            Command::Forward => match app.forward().await {
                Some(result) => print_page(result),
                None => println!("Already at the newest page."),
            },
            Command::Retry => {
                let result = match failed_key.as_deref() {
                    Some(key) => app.open_key(key).await,
                    None => app.retry().await,
                };
                if result.is_ok() {
                    failed_key = None;
                }
                print_page(result);
            }
            Command::Toc => match app.loader().cached(app.current_page()) {
                Some(page) => print_toc(&page),
                None => println!("Current page is not loaded. Try :retry."),
            },
            Command::Pages => {
                let current = app.current_page();
                for page in app.source().pages() {
                    let marker = if page == current { "*" } else { " " };
                    println!("{} {:<14} {}", marker, page.as_str(), page.title());
                }
            }
            Command::Theme => match app.toggle_theme() {
                Ok(theme) => println!("Theme: {}", theme),
                Err(e) => println!("Error: {:#}", e),
            },
            Command::Rebuild => {
                let report = app.rebuild_index().await;
                println!("{} sections indexed.", report.records);
                for skipped in &report.skipped {
                    println!("  {}", skipped);
                }
            }
            Command::Search(q) => print_search(&app, &q),
            Command::Unknown(input) => println!("Unknown command: {} (try :help)", input),
        }
    }

    Ok(())
}

fn print_page(result: Result<Arc<RenderedPage>, DocsError>) {
    match result {
        Ok(page) => {
            println!();
            println!("== {} ==", page.title);
            println!();
            println!("{}", page.text);
        }
        Err(e) => {
            println!("Error loading content. Please try again.");
            println!("  {}", e);
            println!("  (:retry to reload)");
        }
    }
}

fn print_toc(page: &RenderedPage) {
    if page.toc.is_empty() {
        println!("No headings found");
        return;
    }
    for entry in &page.toc {
        let indent = "  ".repeat(entry.level.saturating_sub(1) as usize);
        println!("{}{}", indent, entry.text);
    }
}

fn print_search(app: &DocsApp, q: &str) {
    if !query::is_searchable(q) {
        println!("Type at least {} characters to search.", query::MIN_QUERY_CHARS);
        return;
    }
    let results = app.search(q);
    if results.is_empty() {
        println!("No results found");
        return;
    }
    for (i, result) in results.iter().enumerate() {
        let section = &result.section;
        println!(
            "{:>2}. {} / {}  (:open {})",
            i + 1,
            section.page.title(),
            section.title,
            section.page
        );
        println!("    {}", section.preview);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command(":open api"), Command::Open("api".to_string()));
        assert_eq!(parse_command(":o  testing "), Command::Open("testing".to_string()));
        assert_eq!(parse_command(":b"), Command::Back);
        assert_eq!(parse_command(":forward"), Command::Forward);
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command("   "), Command::Empty);
    }

    #[test]
    fn test_plain_text_is_search() {
        assert_eq!(
            parse_command("  auth tokens "),
            Command::Search("auth tokens".to_string())
        );
    }

    #[test]
    fn test_open_without_page_is_unknown() {
        assert_eq!(parse_command(":open"), Command::Unknown(":open".to_string()));
        assert_eq!(parse_command(":nope"), Command::Unknown(":nope".to_string()));
    }
}
