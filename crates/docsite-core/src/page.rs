//! The closed set of documentation pages.
//!
//! Every page the site can show is a [`PageKey`] variant, so lookups for
//! compile-time-known pages cannot miss. Only dynamic input (URL query
//! parameters, CLI arguments) goes through [`PageKey::from_str`], which is
//! where [`DocsError::ContentNotFound`] originates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DocsError;

/// Identifier of a documentation page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKey {
    Overview,
    QuickStart,
    Development,
    Milestones,
    Features,
    Api,
    Testing,
    Deployment,
    Structure,
}

impl PageKey {
    /// All pages in navigation order.
    pub const ALL: [PageKey; 9] = [
        PageKey::Overview,
        PageKey::QuickStart,
        PageKey::Development,
        PageKey::Milestones,
        PageKey::Features,
        PageKey::Api,
        PageKey::Testing,
        PageKey::Deployment,
        PageKey::Structure,
    ];

    /// The landing page, selected when no `page` parameter is present.
    pub const DEFAULT: PageKey = PageKey::Overview;

    /// Stable kebab-case key used in URLs, config files and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKey::Overview => "overview",
            PageKey::QuickStart => "quick-start",
            PageKey::Development => "development",
            PageKey::Milestones => "milestones",
            PageKey::Features => "features",
            PageKey::Api => "api",
            PageKey::Testing => "testing",
            PageKey::Deployment => "deployment",
            PageKey::Structure => "structure",
        }
    }

    /// Human-readable title shown in navigation and search results.
    pub fn title(&self) -> &'static str {
        match self {
            PageKey::Overview => "Project Overview",
            PageKey::QuickStart => "Quick Start Guide",
            PageKey::Development => "Development Guide",
            PageKey::Milestones => "Development Milestones",
            PageKey::Features => "Feature Specifications",
            PageKey::Api => "API Documentation",
            PageKey::Testing => "Testing Guide",
            PageKey::Deployment => "Deployment Guide",
            PageKey::Structure => "Project Structure",
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKey {
    type Err = DocsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageKey::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| DocsError::ContentNotFound(s.to_string()))
    }
}
