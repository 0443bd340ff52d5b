//! Configuration parsing and validation.
//!
//! partprice is configured with a TOML file (default `./config/partprice.toml`).
//! Every section is optional; omitted values take the defaults below.
//!
//! ```toml
//! [db]
//! path = "./data/components.db"
//!
//! [server]
//! bind = "0.0.0.0:5000"
//! currency = "PLN"
//!
//! [seed]
//! specs_dir = "./specs"
//! include_globs = ["**/*.json"]
//! exclude_globs = []
//! follow_symlinks = false
//!
//! [images]
//! dir = "./images"
//! route = "/images"
//! ```
//!
//! When the `DATA_DIR` environment variable is set, the database file is
//! placed at `$DATA_DIR/components.db` regardless of `[db].path`. This keeps
//! container volume mounts working without a config file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name used when the database location comes from `DATA_DIR`.
pub const DB_FILE_NAME: &str = "components.db";

/// Environment variable that relocates the database directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Top-level configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub images: Option<ImagesConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./data").join(DB_FILE_NAME)
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Currency code echoed in every price response.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            currency: default_currency(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}
fn default_currency() -> String {
    "PLN".to_string()
}

/// Where the first-run seeder looks for component spec files.
#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    #[serde(default = "default_specs_dir")]
    pub specs_dir: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            specs_dir: default_specs_dir(),
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_specs_dir() -> PathBuf {
    PathBuf::from("./specs")
}
fn default_include_globs() -> Vec<String> {
    vec!["**/*.json".to_string()]
}

/// Static image directory exposed over HTTP.
#[derive(Debug, Deserialize, Clone)]
pub struct ImagesConfig {
    pub dir: PathBuf,
    #[serde(default = "default_images_route")]
    pub route: String,
}

fn default_images_route() -> String {
    "/images".to_string()
}

impl Config {
    /// All defaults, no config file involved.
    pub fn minimal() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            self.db.path = PathBuf::from(dir).join(DB_FILE_NAME);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server.bind.trim().is_empty() {
            anyhow::bail!("server.bind must not be empty");
        }
        if self.server.currency.trim().is_empty() {
            anyhow::bail!("server.currency must not be empty");
        }
        if let Some(images) = &self.images {
            if !images.route.starts_with('/') {
                anyhow::bail!("images.route must start with '/', got '{}'", images.route);
            }
            if images.route == "/" {
                anyhow::bail!("images.route must not be the root path");
            }
        }
        Ok(())
    }
}

/// Parse a config from TOML text. Environment overrides are applied.
pub fn parse_config(content: &str) -> Result<Config> {
    let mut config: Config =
        toml::from_str(content).with_context(|| "Failed to parse config file")?;
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

/// Load `path` if it exists, otherwise fall back to [`Config::minimal`].
pub fn load_or_minimal(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::minimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:5000");
        assert_eq!(config.server.currency, "PLN");
        assert_eq!(config.seed.specs_dir, PathBuf::from("./specs"));
        assert_eq!(config.seed.include_globs, vec!["**/*.json".to_string()]);
        assert!(config.images.is_none());
        assert!(config.db.path.ends_with(DB_FILE_NAME));
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
[db]
path = "/tmp/parts.db"

[server]
bind = "127.0.0.1:8080"
currency = "EUR"

[seed]
specs_dir = "/srv/specs"
exclude_globs = ["**/drafts/**"]
follow_symlinks = true

[images]
dir = "/srv/images"
"#,
        )
        .unwrap();
        assert_eq!(config.db.path, PathBuf::from("/tmp/parts.db"));
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.server.currency, "EUR");
        assert_eq!(config.seed.exclude_globs, vec!["**/drafts/**".to_string()]);
        assert!(config.seed.follow_symlinks);
        let images = config.images.unwrap();
        assert_eq!(images.dir, PathBuf::from("/srv/images"));
        assert_eq!(images.route, "/images");
    }

    #[test]
    fn test_rejects_empty_currency() {
        let mut config = Config::default();
        config.server.currency = " ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("currency"));
    }

    #[test]
    fn test_rejects_relative_image_route() {
        let mut config = Config::default();
        config.images = Some(ImagesConfig {
            dir: PathBuf::from("images"),
            route: "images".to_string(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unparseable_toml() {
        assert!(parse_config("[server\nbind = 1").is_err());
    }
}
