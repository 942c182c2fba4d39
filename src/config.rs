//! TOML configuration.
//!
//! ```toml
//! [corpus]
//! path = "./quotes.txt"
//!
//! [server]
//! bind = "0.0.0.0:3000"
//!
//! [logging]
//! level = "info"
//!
//! [themes.wisdom]
//! keywords = ["wisdom", "learn"]
//! authors = ["plato"]
//!
//! [keepalive]
//! url = "https://quotebot.example.org/health"
//! interval_secs = 300
//! ```
//!
//! Only `[corpus]` is required; every other section has defaults.

use anyhow::{bail, Context, Result};
use quotebot_core::query::Theme;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub themes: ThemesConfig,
    #[serde(default)]
    pub keepalive: Option<KeepaliveConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    pub path: PathBuf,
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
    "0.0.0.0:3000".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemesConfig {
    #[serde(default = "Theme::motivational")]
    pub motivational: Theme,
    #[serde(default = "Theme::wisdom")]
    pub wisdom: Theme,
}

impl Default for ThemesConfig {
    fn default() -> Self {
        Self {
            motivational: Theme::motivational(),
            wisdom: Theme::wisdom(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct KeepaliveConfig {
    pub url: String,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_keepalive_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_interval_secs() -> u64 {
    300
}
fn default_keepalive_timeout_secs() -> u64 {
    10
}

const MIN_KEEPALIVE_INTERVAL_SECS: u64 = 10;

impl Config {
    /// Defaults pointing at `./quotes.txt`, used when no config file is needed.
    pub fn minimal() -> Self {
        Self {
            corpus: CorpusConfig {
                path: PathBuf::from("./quotes.txt"),
            },
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            themes: ThemesConfig::default(),
            keepalive: None,
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.corpus.path.as_os_str().is_empty() {
        bail!("corpus.path must not be empty");
    }

    // Relative corpus paths resolve against the config file's directory.
    if config.corpus.path.is_relative() {
        if let Some(dir) = path.parent() {
            config.corpus.path = dir.join(&config.corpus.path);
        }
    }

    validate(&mut config)?;
    Ok(config)
}

fn validate(config: &mut Config) -> Result<()> {
    if config.server.bind.trim().is_empty() {
        bail!("server.bind must not be empty");
    }

    for (name, theme) in [
        ("motivational", &mut config.themes.motivational),
        ("wisdom", &mut config.themes.wisdom),
    ] {
        if theme.keywords.is_empty() && theme.authors.is_empty() {
            bail!("themes.{} needs at least one keyword or author", name);
        }
        *theme = Theme::new(&theme.keywords, &theme.authors);
    }

    if let Some(keepalive) = &config.keepalive {
        if !(keepalive.url.starts_with("http://") || keepalive.url.starts_with("https://")) {
            bail!("keepalive.url must start with http:// or https://");
        }
        if keepalive.interval_secs < MIN_KEEPALIVE_INTERVAL_SECS {
            bail!(
                "keepalive.interval_secs must be >= {}",
                MIN_KEEPALIVE_INTERVAL_SECS
            );
        }
        if keepalive.timeout_secs == 0 {
            bail!("keepalive.timeout_secs must be > 0");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quotebot.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn minimal_file_gets_defaults() {
        let (dir, path) = write_config("[corpus]\npath = \"quotes.txt\"\n");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.corpus.path, dir.path().join("quotes.txt"));
        assert_eq!(cfg.server.bind, "0.0.0.0:3000");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.themes.wisdom, Theme::wisdom());
        assert!(cfg.keepalive.is_none());
    }

    #[test]
    fn theme_overrides_are_lowercased() {
        let (_dir, path) = write_config(
            r#"[corpus]
path = "/tmp/quotes.txt"

[themes.motivational]
keywords = ["Hope"]
authors = ["Maya Angelou"]
"#,
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.corpus.path, PathBuf::from("/tmp/quotes.txt"));
        assert_eq!(cfg.themes.motivational.keywords, vec!["hope"]);
        assert_eq!(cfg.themes.motivational.authors, vec!["maya angelou"]);
        assert_eq!(cfg.themes.wisdom, Theme::wisdom());
    }

    #[test]
    fn empty_theme_rejected() {
        let (_dir, path) = write_config(
            "[corpus]\npath = \"q.txt\"\n\n[themes.wisdom]\nkeywords = []\nauthors = []\n",
        );
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("themes.wisdom"));
    }

    #[test]
    fn keepalive_validation() {
        let (_dir, path) = write_config(
            "[corpus]\npath = \"q.txt\"\n\n[keepalive]\nurl = \"ftp://x\"\n",
        );
        assert!(load_config(&path).is_err());

        let (_dir, path) = write_config(
            "[corpus]\npath = \"q.txt\"\n\n[keepalive]\nurl = \"http://x\"\ninterval_secs = 1\n",
        );
        assert!(load_config(&path).is_err());

        let (_dir, path) = write_config(
            "[corpus]\npath = \"q.txt\"\n\n[keepalive]\nurl = \"http://x\"\ntimeout_secs = 0\n",
        );
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("keepalive.timeout_secs"));

        let (_dir, path) = write_config(
            "[corpus]\npath = \"q.txt\"\n\n[keepalive]\nurl = \"http://x/health\"\n",
        );
        let cfg = load_config(&path).unwrap();
        let keepalive = cfg.keepalive.unwrap();
        assert_eq!(keepalive.interval_secs, 300);
        assert_eq!(keepalive.timeout_secs, 10);
    }

    #[test]
    fn missing_file_errors() {
        let err = load_config(Path::new("/nonexistent/quotebot.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
