//! Project configuration loaded from `modkit.toml`.
//!
//! Every key has a default, so a project without a config file still works:
//! the file only needs to spell out what it overrides. Keys are kebab-case
//! to match the on-disk config surface the original module tooling exposed
//! (`statuses-file`, `cache-key`, `cache-lifetime`, `cache.enabled`).

use crate::core::error::ModkitError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "modkit.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Environment name; `"local"` relaxes destructive-command guards.
    pub env: String,
    pub activator: ActivatorConfig,
    pub cache: CacheConfig,
    pub paths: PathsConfig,
    pub database: DatabaseConfig,
    /// Project root the config was resolved against. Not read from the file.
    #[serde(skip)]
    pub root: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ActivatorConfig {
    /// Durable JSON file holding the module statuses map, relative to root.
    pub statuses_file: String,
    /// Key the statuses map is cached under.
    pub cache_key: String,
    /// Cache time-to-live in seconds.
    pub cache_lifetime: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CacheConfig {
    /// When false every read goes straight to the statuses file.
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PathsConfig {
    /// Directory scanned for modules, relative to root.
    pub modules: String,
    /// Migration scripts directory, relative to a module root.
    pub migrations: String,
    /// Seeder scripts directory, relative to a module root.
    pub seeders: String,
    /// Generated error types directory, relative to a module root.
    pub errors: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DatabaseConfig {
    /// SQLite database file migrations and seeders run against.
    pub path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            env: "production".into(),
            activator: ActivatorConfig::default(),
            cache: CacheConfig::default(),
            paths: PathsConfig::default(),
            database: DatabaseConfig::default(),
            root: PathBuf::new(),
        }
    }
}

impl Default for ActivatorConfig {
    fn default() -> Self {
        ActivatorConfig {
            statuses_file: "modules_statuses.json".into(),
            cache_key: "modkit-modules".into(),
            cache_lifetime: 604800,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig { enabled: false }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            modules: "modules".into(),
            migrations: "database/migrations".into(),
            seeders: "database/seeders".into(),
            errors: "src/errors".into(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: "database/app.sqlite3".into(),
        }
    }
}

impl Config {
    /// Walk up from `start_dir` looking for `modkit.toml`; the directory
    /// holding it becomes the project root. Without a config file the
    /// defaults apply and `start_dir` itself is the root.
    pub fn load(start_dir: &Path) -> Result<Config, ModkitError> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Config::from_file(&candidate);
            }
            if !dir.pop() {
                break;
            }
        }
        let mut config = Config::default();
        config.root = start_dir.to_path_buf();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config, ModkitError> {
        let raw = fs::read_to_string(path).map_err(ModkitError::IoError)?;
        let mut config: Config =
            toml::from_str(&raw).map_err(|source| ModkitError::MalformedConfig {
                path: path.to_path_buf(),
                source,
            })?;
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }

    pub fn statuses_file_path(&self) -> PathBuf {
        self.root.join(&self.activator.statuses_file)
    }

    pub fn modules_path(&self) -> PathBuf {
        self.root.join(&self.paths.modules)
    }

    pub fn database_path(&self) -> PathBuf {
        self.root.join(&self.database.path)
    }
}
