//! Writes generated files to disk.

use crate::core::error::ModkitError;
use std::fs;
use std::path::{Path, PathBuf};

/// One generated file. Refuses to overwrite unless forced.
pub struct FileGenerator {
    path: PathBuf,
    contents: String,
    force: bool,
}

impl FileGenerator {
    pub fn new(path: PathBuf, contents: String) -> FileGenerator {
        FileGenerator {
            path,
            contents,
            force: false,
        }
    }

    pub fn force(mut self, force: bool) -> FileGenerator {
        self.force = force;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates parent directories as needed and writes the file.
    pub fn generate(&self) -> Result<(), ModkitError> {
        if self.path.exists() && !self.force {
            return Err(ModkitError::FileAlreadyExists(self.path.clone()));
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(ModkitError::IoError)?;
        }
        fs::write(&self.path, &self.contents).map_err(ModkitError::IoError)?;
        Ok(())
    }
}
