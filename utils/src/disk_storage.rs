//! Utilities for reading a struct from a TOML file under `~/.egx`.
//! The struct should implement Deserialize from serde.

use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use serde::de::DeserializeOwned;

/// Directory holding the config and log files.
pub fn egx_dir() -> crate::Result<PathBuf> {
    let dirs = BaseDirs::new().ok_or(crate::Error::BaseDirsFailed)?;
    Ok(dirs.home_dir().join(".egx"))
}

pub trait DiskStorageInterface
where
    Self: Sized + Debug + Default + DeserializeOwned,
{
    const FILE_NAME: &'static str;

    /// Get the path to the file
    fn path() -> crate::Result<PathBuf> {
        Ok(egx_dir()?.join(Self::FILE_NAME).with_extension("toml"))
    }

    /// Load the content from the file if it exists otherwise return the default value
    fn load() -> crate::Result<Self> {
        Self::load_from(&Self::path()?)
    }

    fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| crate::Error::FileReadFailed(path.to_path_buf(), e))?;

            toml::from_str(&content)
                .map_err(|e| crate::Error::TomlParsingFailed(path.to_path_buf(), e))
        } else {
            Ok(Self::default())
        }
    }
}
