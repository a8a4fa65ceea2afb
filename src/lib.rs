//! # docsite
//!
//! Documentation viewer for the Itsriober School Management System.
//!
//! The core ([`docsite_core`]) splits markdown pages into heading-delimited
//! sections, ranks them against free-text queries, and renders pages through a
//! memoizing loader. This crate wires that core to configuration, content
//! sources (embedded or HTTP), persisted preferences, and three frontends.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │   Content    │──▶│   Indexer    │──▶│    Query     │
//! │ embedded/http│   │  sections    │   │   scoring    │
//! └──────┬───────┘   └──────────────┘   └──────┬───────┘
//!        │           ┌──────────────┐          │
//!        └──────────▶│ Page Loader  │          │
//!                    │ render+cache │          │
//!                    └──────┬───────┘          │
//!                           ▼                  ▼
//!            ┌─────────┐ ┌──────────┐ ┌──────────────┐
//!            │   CLI   │ │   HTTP   │ │   browse     │
//!            │(docsite)│ │  (axum)  │ │ (rustyline)  │
//!            └─────────┘ └──────────┘ └──────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`content`] | Embedded and HTTP content sources |
//! | [`prefs`] | Persisted theme preference |
//! | [`app`] | Controller owning loader, index, history, and preferences |
//! | [`pages`] | `docsite pages` listing |
//! | [`show`] | `docsite show` page output |
//! | [`search`] | `docsite search` and `docsite index` |
//! | [`shell`] | Server-rendered HTML shell |
//! | [`server`] | HTTP server |
//! | [`browse`] | Interactive terminal browser |

pub mod app;
pub mod browse;
pub mod config;
pub mod content;
pub mod pages;
pub mod prefs;
pub mod search;
pub mod server;
pub mod shell;
pub mod show;
