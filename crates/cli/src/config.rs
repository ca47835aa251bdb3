//! Configuration file loading and environment variable handling.
//!
//! Precedence: CLI args > Environment vars > Config file > Defaults

use std::fs;
use std::path::PathBuf;

use dtstamp_core::{Locale, Modifier};
use serde::Deserialize;

/// Default config file content for `--config-init`.
pub const DEFAULT_CONFIG: &str = r#"# dts configuration
# See: dts --help for all options

# Table used to preview absolute styles: "en-US", "en-GB" or "iso"
locale = "en-US"

# Styles to show (empty = all). Letters: f F t T d D R
only = []

# Disable colored output
no_color = false
"#;

/// Configuration loaded from file and environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: Option<Locale>,
    pub only: Option<Vec<Modifier>>,
    pub no_color: Option<bool>,
}

/// Where a merged setting came from, for debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Env(&'static str),
    File,
    Default,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Env(name) => write!(f, "env {}", name),
            Self::File => f.write_str("config file"),
            Self::Default => f.write_str("default"),
        }
    }
}

impl Config {
    /// Get the config file path.
    ///
    /// - Linux: `~/.config/dts/config.toml`
    /// - macOS: `~/Library/Application Support/dts/config.toml`
    /// - Windows: `%APPDATA%\dts\config.toml`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dts").join("config.toml"))
    }

    /// Load config from file. Returns default if file doesn't exist.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };

        let Ok(contents) = fs::read_to_string(&path) else {
            tracing::trace!("No config file at: {}", path.display());
            return Self::default();
        };

        tracing::debug!("Loaded config from: {}", path.display());
        Self::parse(&contents).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Read value from environment variable.
    fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
        std::env::var(name).ok()?.parse().ok()
    }

    /// Get locale with precedence: env > config > default.
    pub fn locale(&self) -> (Locale, Source) {
        if let Some(locale) = Self::env_var::<Locale>("DTS_LOCALE") {
            return (locale, Source::Env("DTS_LOCALE"));
        }
        match self.locale {
            Some(locale) => (locale, Source::File),
            None => (Locale::default(), Source::Default),
        }
    }

    /// Get the style filter with precedence: env > config > default (all).
    pub fn only(&self) -> (Vec<Modifier>, Source) {
        if let Ok(raw) = std::env::var("DTS_ONLY") {
            if let Ok(only) = parse_modifiers(&raw) {
                return (only, Source::Env("DTS_ONLY"));
            }
        }
        match &self.only {
            Some(only) => (only.clone(), Source::File),
            None => (Vec::new(), Source::Default),
        }
    }

    /// Get no_color with precedence: env > config > default.
    ///
    /// Respects the `NO_COLOR` standard (https://no-color.org/).
    pub fn no_color(&self) -> bool {
        // NO_COLOR is a standard - presence means disable color
        if std::env::var("NO_COLOR").is_ok() {
            return true;
        }
        if std::env::var("DTS_NO_COLOR").is_ok() {
            return true;
        }
        self.no_color.unwrap_or(false)
    }
}

/// Parse a comma-separated modifier list like `f,R` or `fR`.
pub fn parse_modifiers(raw: &str) -> Result<Vec<Modifier>, dtstamp_core::QueryError> {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| c.to_string().parse())
        .collect()
}

/// Create a default config file at the standard location.
pub fn init_config() -> Result<PathBuf, String> {
    let path = Config::path().ok_or("Cannot determine config directory")?;

    if path.exists() {
        return Err(format!("Config file already exists: {}", path.display()));
    }

    // Create parent directory
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create directory: {}", e))?;
    }

    fs::write(&path, DEFAULT_CONFIG).map_err(|e| format!("Failed to write config: {}", e))?;

    Ok(path)
}
