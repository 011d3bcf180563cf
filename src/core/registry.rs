//! Module discovery: scans the configured modules root for directories
//! carrying a `module.toml` manifest.
//!
//! The registry answers "which modules exist" and "where do they live";
//! whether a module is *enabled* is the activation store's question. That
//! split is deliberate: the store resolves unknown names to disabled, the
//! registry is the only place that can say a module does not exist.

use crate::core::activator::FileActivator;
use crate::core::config::Config;
use crate::core::error::ModkitError;
use crate::core::module::{self, Module};
use std::fs;
use std::path::PathBuf;

pub struct ModuleRegistry {
    modules: Vec<Module>,
}

impl ModuleRegistry {
    /// Scans one level below the modules root. Directories without a
    /// manifest are skipped; a manifest that fails to parse is a hard error.
    pub fn discover(config: &Config) -> Result<ModuleRegistry, ModkitError> {
        let root = config.modules_path();
        let mut modules = Vec::new();
        if root.is_dir() {
            for entry in fs::read_dir(&root).map_err(ModkitError::IoError)? {
                let entry = entry.map_err(ModkitError::IoError)?;
                let path = entry.path();
                if path.is_dir() && path.join(module::MANIFEST_FILE).is_file() {
                    modules.push(Module::from_dir(&path)?);
                }
            }
        }
        modules.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(ModuleRegistry { modules })
    }

    /// All modules, name-sorted.
    pub fn all(&self) -> &[Module] {
        &self.modules
    }

    /// Modules in processing order: priority descending, name as tiebreak.
    pub fn ordered(&self) -> Vec<&Module> {
        let mut ordered: Vec<&Module> = self.modules.iter().collect();
        ordered.sort_by(|a, b| {
            b.priority()
                .cmp(&a.priority())
                .then_with(|| a.name().cmp(b.name()))
        });
        ordered
    }

    /// Enabled modules in processing order.
    pub fn ordered_enabled(&self, activator: &FileActivator) -> Vec<&Module> {
        self.ordered()
            .into_iter()
            .filter(|m| m.enabled(activator))
            .collect()
    }

    pub fn core_modules(&self) -> Vec<&Module> {
        self.modules.iter().filter(|m| m.is_core()).collect()
    }

    pub fn find(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name() == name)
    }

    pub fn find_or_fail(&self, name: &str) -> Result<&Module, ModkitError> {
        self.find(name)
            .ok_or_else(|| ModkitError::ModuleNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn module_path(&self, name: &str) -> Result<PathBuf, ModkitError> {
        Ok(self.find_or_fail(name)?.path().to_path_buf())
    }

    pub fn count(&self) -> usize {
        self.modules.len()
    }
}
