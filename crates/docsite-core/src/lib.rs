//! # docsite core
//!
//! Runtime-agnostic logic for docsite: page keys, data models, the section
//! indexer, the query engine, markdown rendering, the content-source trait,
//! the cached page loader, and navigation history.
//!
//! This crate contains no tokio, network, or filesystem dependencies. Any
//! frontend (HTTP server, CLI, interactive terminal) drives it through plain
//! functions and the [`ContentSource`](source::ContentSource) trait.
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌──────────────┐
//! │ContentSource │──▶│   indexer   │──▶│ query engine │
//! │ embedded/http│   │  sections   │   │ score + top10│
//! └──────┬───────┘   └─────────────┘   └──────────────┘
//!        │
//!        ▼
//! ┌──────────────┐   ┌─────────────┐
//! │ PageLoader   │──▶│   render    │
//! │ cache by key │   │ html + toc  │
//! └──────────────┘   └─────────────┘
//! ```

pub mod error;
pub mod index;
pub mod loader;
pub mod models;
pub mod nav;
pub mod page;
pub mod query;
pub mod render;
pub mod source;

pub use error::DocsError;
pub use page::PageKey;
