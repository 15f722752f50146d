//! Optional `lore.toml` configuration and library-root discovery.

use crate::core::error::LoreError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "lore.toml";
pub const DEFAULT_LIBRARY_DIR: &str = "experiences";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySection {
    /// Directory holding the entries, relative to the library root.
    pub root: String,
}

impl Default for LibrarySection {
    fn default() -> Self {
        LibrarySection {
            root: DEFAULT_LIBRARY_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidateSection {
    pub description_min: usize,
    pub description_max: usize,
}

impl Default for ValidateSection {
    fn default() -> Self {
        ValidateSection {
            description_min: 20,
            description_max: 200,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub library: LibrarySection,
    pub validate: ValidateSection,
}

impl Config {
    /// Read `lore.toml` from `root`, falling back to defaults when the
    /// file does not exist.
    pub fn load(root: &Path) -> Result<Config, LoreError> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(&path).map_err(LoreError::IoError)?;
        let config: Config = toml::from_str(&raw)?;
        Ok(config)
    }
}

/// Resolved invocation context: where the library lives and how it is
/// configured.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
}

impl Workspace {
    /// Resolve the workspace for a command. An explicit `--root` wins;
    /// otherwise walk up from the current directory looking for a
    /// `lore.toml` or an `experiences/` directory, falling back to the
    /// current directory itself.
    pub fn resolve(explicit_root: Option<&Path>) -> Result<Workspace, LoreError> {
        let root = match explicit_root {
            Some(dir) => {
                if !dir.is_dir() {
                    return Err(LoreError::PathError(format!(
                        "--root is not a directory: {}",
                        dir.display()
                    )));
                }
                dir.to_path_buf()
            }
            None => {
                let cwd = std::env::current_dir().map_err(LoreError::IoError)?;
                find_library_root(&cwd).unwrap_or(cwd)
            }
        };
        let config = Config::load(&root)?;
        Ok(Workspace { root, config })
    }

    /// Directory that holds the entries.
    pub fn library_dir(&self) -> PathBuf {
        self.root.join(&self.config.library.root)
    }
}

/// Walk up the ancestor chain looking for a library root marker.
pub fn find_library_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(CONFIG_FILE).is_file() || dir.join(DEFAULT_LIBRARY_DIR).is_dir() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_config_absent() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.library.root, "experiences");
        assert_eq!(config.validate.description_min, 20);
        assert_eq!(config.validate.description_max, 200);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[validate]\ndescription_min = 5\n",
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.validate.description_min, 5);
        assert_eq!(config.validate.description_max, 200);
        assert_eq!(config.library.root, "experiences");
    }

    #[test]
    fn root_discovery_walks_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("experiences").join("debugging");
        fs::create_dir_all(&nested).unwrap();
        let found = find_library_root(&nested).unwrap();
        assert_eq!(found, dir.path());
    }
}
