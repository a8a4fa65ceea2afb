//! Persisted viewer preferences.
//!
//! A single `theme = "light" | "dark"` pair stored in a small TOML file. The
//! browser keeps its own copy in `localStorage`; this file is the CLI's
//! setting and the server's default for first-time visitors.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => anyhow::bail!("Unknown theme: '{}'. Must be light or dark.", other),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    theme: Theme,
}

/// File-backed preference store.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
}

impl Preferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored theme; a missing or unreadable file means [`Theme::Light`].
    pub fn theme(&self) -> Theme {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return Theme::default();
        };
        match toml::from_str::<PrefsFile>(&content) {
            Ok(file) => file.theme,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable preferences");
                Theme::default()
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create preferences directory: {}", parent.display())
                })?;
            }
        }
        let content = toml::to_string(&PrefsFile { theme })?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write preferences: {}", self.path.display()))
    }

    /// Flip and persist the theme, returning the new value.
    pub fn toggle_theme(&self) -> Result<Theme> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}
