//! A module: one self-contained feature package on disk.

use crate::core::activator::FileActivator;
use crate::core::error::ModkitError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "module.toml";

/// Deserialized `module.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Higher priority modules migrate and seed first.
    #[serde(default)]
    pub priority: i64,
    /// Core modules are the ones `enable-all` and `reinstall` operate on.
    #[serde(default)]
    pub core: bool,
}

#[derive(Debug, Clone)]
pub struct Module {
    manifest: ModuleManifest,
    path: PathBuf,
}

impl Module {
    /// Loads a module from a directory containing `module.toml`.
    pub fn from_dir(dir: &Path) -> Result<Module, ModkitError> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let raw = fs::read_to_string(&manifest_path).map_err(ModkitError::IoError)?;
        let manifest: ModuleManifest =
            toml::from_str(&raw).map_err(|source| ModkitError::MalformedManifest {
                path: manifest_path.clone(),
                source,
            })?;
        if manifest.name.trim().is_empty() {
            return Err(ModkitError::ValidationError(format!(
                "module manifest {} has an empty name",
                manifest_path.display()
            )));
        }
        Ok(Module {
            manifest,
            path: dir.to_path_buf(),
        })
    }

    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn manifest(&self) -> &ModuleManifest {
        &self.manifest
    }

    pub fn priority(&self) -> i64 {
        self.manifest.priority
    }

    pub fn is_core(&self) -> bool {
        self.manifest.core
    }

    /// Activation state is owned by the store; the module only carries its
    /// name. The activator is passed explicitly, never looked up ambiently.
    pub fn enabled(&self, activator: &FileActivator) -> bool {
        activator.is_enabled(self.name())
    }

    pub fn enable(&self, activator: &mut FileActivator) -> Result<(), ModkitError> {
        activator.set_enabled(self.name(), true)
    }

    pub fn disable(&self, activator: &mut FileActivator) -> Result<(), ModkitError> {
        activator.set_enabled(self.name(), false)
    }
}

/// Public URL of a file shipped by a module.
pub fn module_url(module: &str, file: &str) -> String {
    format!("/modules/{}/{}", module, file.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn manifest_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "name = \"Blog\"\n").unwrap();
        let module = Module::from_dir(dir.path()).unwrap();
        assert_eq!(module.name(), "Blog");
        assert_eq!(module.priority(), 0);
        assert!(!module.is_core());
        assert_eq!(module.manifest().description, "");
    }

    #[test]
    fn empty_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "name = \"  \"\n").unwrap();
        assert!(matches!(
            Module::from_dir(dir.path()),
            Err(ModkitError::ValidationError(_))
        ));
    }

    #[test]
    fn malformed_manifest_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "name = [oops").unwrap();
        assert!(matches!(
            Module::from_dir(dir.path()),
            Err(ModkitError::MalformedManifest { .. })
        ));
    }

    #[test]
    fn module_url_joins_cleanly() {
        assert_eq!(module_url("Blog", "css/app.css"), "/modules/Blog/css/app.css");
        assert_eq!(module_url("Blog", "/css/app.css"), "/modules/Blog/css/app.css");
    }
}
