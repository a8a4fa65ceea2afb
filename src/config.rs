use anyhow::{Context, Result};
use docsite_core::PageKey;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// `embedded` (compiled-in markdown) or `http` (fetched from `base_url`).
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Page key to path relative to `base_url`. Unlisted pages use `<key>.md`.
    #[serde(default)]
    pub files: BTreeMap<String, String>,
    /// No timeout unless set.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            base_url: None,
            files: BTreeMap::new(),
            timeout_secs: None,
        }
    }
}

fn default_mode() -> String {
    "embedded".to_string()
}

impl ContentConfig {
    pub fn is_http(&self) -> bool {
        self.mode == "http"
    }

    pub fn file_for(&self, page: PageKey) -> String {
        self.files
            .get(page.as_str())
            .cloned()
            .unwrap_or_else(|| format!("{}.md", page))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Idle time the browser waits after the last keystroke before querying.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}

#[derive(Debug, Deserialize, Clone)]
pub struct PreferencesConfig {
    #[serde(default = "default_prefs_path")]
    pub path: PathBuf,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: default_prefs_path(),
        }
    }
}

fn default_prefs_path() -> PathBuf {
    PathBuf::from("./data/prefs.toml")
}

impl Config {
    /// Embedded content, default bind address and preference path.
    pub fn minimal() -> Self {
        Self::default()
    }
}

/// Load `path`, or fall back to [`Config::minimal`] when the file does not exist.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(Config::minimal());
    }
    load_config(path)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    match config.content.mode.as_str() {
        "embedded" | "http" => {}
        other => anyhow::bail!(
            "Unknown content mode: '{}'. Must be embedded or http.",
            other
        ),
    }

    if config.content.is_http() {
        let base = config
            .content
            .base_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("content.base_url must be set when mode is 'http'"))?;
        reqwest::Url::parse(base)
            .with_context(|| format!("content.base_url is not a valid URL: {}", base))?;
    }

    for key in config.content.files.keys() {
        key.parse::<PageKey>()
            .with_context(|| format!("content.files has an entry for an unknown page: {}", key))?;
    }

    if config.content.timeout_secs == Some(0) {
        anyhow::bail!("content.timeout_secs must be > 0 when set");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> Result<Config> {
        let config: Config = toml::from_str(toml_src)?;
        validate(&config)?;
        Ok(config)
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.content.mode, "embedded");
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.preferences.path, PathBuf::from("./data/prefs.toml"));
    }

    #[test]
    fn test_http_mode_with_files() {
        let config = parse(
            r#"
[content]
mode = "http"
base_url = "http://localhost:8080/docs/"

[content.files]
quick-start = "../QUICK_START.md"
"#,
        )
        .unwrap();
        assert!(config.content.is_http());
        assert_eq!(config.content.file_for(PageKey::QuickStart), "../QUICK_START.md");
        assert_eq!(config.content.file_for(PageKey::Api), "api.md");
    }

    #[test]
    fn test_http_mode_requires_base_url() {
        let err = parse("[content]\nmode = \"http\"\n").unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = parse("[content]\nmode = \"ftp\"\n").unwrap_err();
        assert!(err.to_string().contains("Unknown content mode"));
    }

    #[test]
    fn test_unknown_page_in_files_rejected() {
        let err = parse(
            "[content]\nmode = \"http\"\nbase_url = \"http://x/\"\n[content.files]\nnonexistent-page = \"x.md\"\n",
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("nonexistent-page"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = parse("[content]\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = load_or_default(Path::new("/definitely/not/here.toml")).unwrap();
        assert_eq!(config.content.mode, "embedded");
    }
}
