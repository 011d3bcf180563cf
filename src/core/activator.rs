//! File-backed module activation store.
//!
//! `FileActivator` is the single source of truth for which modules are
//! enabled. The durable form is a pretty-printed JSON object mapping module
//! name to a boolean, suitable for human diffing:
//!
//! ```json
//! {
//!   "Billing": false,
//!   "Blog": true
//! }
//! ```
//!
//! A name absent from the map reads as disabled; the store never answers
//! "unknown module" (existence checks belong to the registry). Reads can be
//! fronted by a TTL cache, chosen once at construction from config. Every
//! mutation persists the full map first (write-to-temp then rename, so a
//! crash never leaves a half-written file) and only then invalidates the
//! cache; invalidating first would let another reader repopulate the cache
//! from stale durable state.
//!
//! The cache lives inside the `FileActivator` instance. A CLI process
//! constructs one store and loads once, so the cache only earns its keep in
//! a long-lived embedding that re-reads; a one-shot command never hits it.
//!
//! I/O and parse failures propagate to the caller untouched. A statuses
//! file that exists but does not parse as a string→bool map is fatal at
//! load time; recovery is an explicit `reset()`.

use crate::core::config::Config;
use crate::core::error::ModkitError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Module name → enabled flag. A BTreeMap keeps the serialized form stable.
pub type ModuleStatusMap = BTreeMap<String, bool>;

/// Read strategy for the statuses map, fixed at construction.
trait StatusLoader {
    fn load(&self) -> Result<ModuleStatusMap, ModkitError>;
    fn invalidate(&self);
}

/// Reads the statuses file on every load. Used when caching is disabled.
struct DirectLoader {
    path: PathBuf,
}

impl StatusLoader for DirectLoader {
    fn load(&self) -> Result<ModuleStatusMap, ModkitError> {
        read_statuses(&self.path)
    }

    fn invalidate(&self) {}
}

/// Decorates `DirectLoader` with a get-or-compute TTL cache.
struct CachedLoader {
    direct: DirectLoader,
    cache: moka::sync::Cache<String, ModuleStatusMap>,
    key: String,
}

impl CachedLoader {
    fn new(path: PathBuf, key: String, lifetime: Duration) -> Self {
        let cache = moka::sync::Cache::builder()
            .max_capacity(1)
            .time_to_live(lifetime)
            .build();
        CachedLoader {
            direct: DirectLoader { path },
            cache,
            key,
        }
    }
}

impl StatusLoader for CachedLoader {
    fn load(&self) -> Result<ModuleStatusMap, ModkitError> {
        if let Some(statuses) = self.cache.get(&self.key) {
            return Ok(statuses);
        }
        let statuses = self.direct.load()?;
        self.cache.insert(self.key.clone(), statuses.clone());
        Ok(statuses)
    }

    fn invalidate(&self) {
        self.cache.invalidate(&self.key);
    }
}

fn read_statuses(path: &Path) -> Result<ModuleStatusMap, ModkitError> {
    if !path.exists() {
        return Ok(ModuleStatusMap::new());
    }
    let raw = fs::read_to_string(path).map_err(ModkitError::IoError)?;
    serde_json::from_str(&raw).map_err(|source| ModkitError::MalformedStatuses {
        path: path.to_path_buf(),
        source,
    })
}

pub struct FileActivator {
    statuses_file: PathBuf,
    statuses: ModuleStatusMap,
    loader: Box<dyn StatusLoader>,
}

impl std::fmt::Debug for FileActivator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileActivator")
            .field("statuses_file", &self.statuses_file)
            .field("statuses", &self.statuses)
            .finish_non_exhaustive()
    }
}

impl FileActivator {
    /// Builds the store and loads the map once: from the cache when enabled
    /// and warm, otherwise from the statuses file (absent file ⇒ empty map).
    pub fn from_config(config: &Config) -> Result<FileActivator, ModkitError> {
        let statuses_file = config.statuses_file_path();
        let loader: Box<dyn StatusLoader> = if config.cache.enabled {
            Box::new(CachedLoader::new(
                statuses_file.clone(),
                config.activator.cache_key.clone(),
                Duration::from_secs(config.activator.cache_lifetime),
            ))
        } else {
            Box::new(DirectLoader {
                path: statuses_file.clone(),
            })
        };
        let statuses = loader.load()?;
        Ok(FileActivator {
            statuses_file,
            statuses,
            loader,
        })
    }

    /// Path of the durable statuses file. Pure accessor.
    pub fn statuses_file_path(&self) -> &Path {
        &self.statuses_file
    }

    /// Stored flag for `name`, or `false` when the name was never recorded.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.statuses.get(name).copied().unwrap_or(false)
    }

    /// Sets the flag and persists the full map before invalidating the cache.
    /// The mutation is complete only once the durable write succeeded.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), ModkitError> {
        self.statuses.insert(name.to_string(), enabled);
        self.write_statuses()?;
        self.loader.invalidate();
        Ok(())
    }

    /// Drops `name` from the map. No-op when it was never recorded.
    pub fn remove(&mut self, name: &str) -> Result<(), ModkitError> {
        if self.statuses.remove(name).is_none() {
            return Ok(());
        }
        self.write_statuses()?;
        self.loader.invalidate();
        Ok(())
    }

    /// Deletes the statuses file, clears the map, and invalidates the cache.
    /// The file is not recreated until the next mutation.
    pub fn reset(&mut self) -> Result<(), ModkitError> {
        if self.statuses_file.exists() {
            fs::remove_file(&self.statuses_file).map_err(ModkitError::IoError)?;
        }
        self.statuses.clear();
        self.loader.invalidate();
        Ok(())
    }

    fn write_statuses(&self) -> Result<(), ModkitError> {
        if let Some(parent) = self.statuses_file.parent() {
            fs::create_dir_all(parent).map_err(ModkitError::IoError)?;
        }
        let payload = serde_json::to_string_pretty(&self.statuses)?;
        // Swap in atomically so a crash mid-write cannot corrupt the store.
        let tmp = self.statuses_file.with_extension("json.tmp");
        fs::write(&tmp, payload).map_err(ModkitError::IoError)?;
        fs::rename(&tmp, &self.statuses_file).map_err(ModkitError::IoError)?;
        Ok(())
    }
}
