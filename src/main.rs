//! # docsite CLI
//!
//! The `docsite` binary reads and searches the Itsriober documentation from
//! the terminal, serves it over HTTP, or opens an interactive browser.
//!
//! ## Usage
//!
//! ```bash
//! docsite --config ./config/docsite.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `docsite pages` | List pages and whether the content source can serve them |
//! | `docsite show <page>` | Print a rendered page, its TOC, or its markdown |
//! | `docsite search "<query>"` | Ranked section search |
//! | `docsite index` | Build the section index and summarize it |
//! | `docsite theme [show\|toggle\|set]` | Read or change the default theme |
//! | `docsite serve` | Start the HTTP server |
//! | `docsite browse` | Interactive terminal browser |
//!
//! ## Examples
//!
//! ```bash
//! docsite search "authentication"
//! docsite show api --toc
//! docsite serve --config ./config/docsite.toml
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use clap::{Parser, Subcommand};
use docsite::prefs::{Preferences, Theme};
use docsite::show::ShowFormat;
use docsite::{browse, config, pages, search, server, show};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// docsite: documentation viewer with section search.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. A missing file means built-in defaults (embedded content).
#[derive(Parser)]
#[command(
    name = "docsite",
    about = "Documentation viewer with section search for the Itsriober School Management System",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/docsite.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List pages and their availability.
    Pages,

    /// Render one page.
    Show {
        /// Page key, e.g. `api` or `quick-start`.
        page: String,

        /// Print only the table of contents.
        #[arg(long, conflicts_with = "markdown")]
        toc: bool,

        /// Print the raw markdown instead of HTML.
        #[arg(long)]
        markdown: bool,
    },

    /// Search all sections.
    ///
    /// Each query word scores +10 when it equals a section title, otherwise +5
    /// when the title contains it, plus 1 when the body contains it. At most
    /// ten results.
    Search {
        query: String,

        /// Emit results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Build the search index and print a summary.
    Index {
        /// Emit every section record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show or change the default theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Start the HTTP server on `[server].bind`.
    Serve,

    /// Interactive terminal browser.
    Browse,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the stored theme.
    Show,
    /// Flip between light and dark.
    Toggle,
    /// Set an explicit theme.
    Set {
        /// `light` or `dark`.
        theme: Theme,
    },
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(match cli.command {
        Commands::Serve => "info",
        _ => "warn",
    });

    let cfg = config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Pages => {
            pages::list_pages(&cfg).await?;
        }
        Commands::Show {
            page,
            toc,
            markdown,
        } => {
            let format = if toc {
                ShowFormat::Toc
            } else if markdown {
                ShowFormat::Markdown
            } else {
                ShowFormat::Html
            };
            show::run_show(&cfg, &page, format).await?;
        }
        Commands::Search { query, json } => {
            search::run_search(&cfg, &query, json).await?;
        }
        Commands::Index { json } => {
            search::run_index(&cfg, json).await?;
        }
        Commands::Theme { action } => {
            let prefs = Preferences::new(cfg.preferences.path.clone());
            match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => println!("{}", prefs.theme()),
                ThemeAction::Toggle => println!("{}", prefs.toggle_theme()?),
                ThemeAction::Set { theme } => {
                    prefs.set_theme(theme)?;
                    println!("{}", theme);
                }
            }
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Browse => {
            browse::run_browse(&cfg).await?;
        }
    }

    Ok(())
}
