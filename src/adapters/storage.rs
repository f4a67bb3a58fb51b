use crate::core::Storage;
use crate::utils::error::{BridgeError, Result};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

/// Files on the local filesystem. Relative paths are resolved against
/// `base_path`; absolute paths are used as-is.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    fn read_text(&self, path: &str) -> Result<String> {
        let full_path = self.resolve(path);
        let data = fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BridgeError::InputNotFoundError {
                path: full_path.display().to_string(),
            },
            _ => BridgeError::IoError(e),
        })?;

        String::from_utf8(data).map_err(|source| BridgeError::DecodeError {
            path: full_path.display().to_string(),
            source,
        })
    }

    fn create(&self, path: &str) -> Result<Box<dyn Write + Send>> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        Ok(Box::new(File::create(full_path)?))
    }
}
