use crate::{AppConfig, RdCompareError};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "rdcompare.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub path: Option<PathBuf>,
    pub exists: bool,
}

/// Load configuration from `explicit` if given, otherwise from the per-user
/// config directory. A missing default file yields the defaults; a missing
/// explicit file is an error. The file is never written.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, RdCompareError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(RdCompareError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = read_config(path)?;
        return Ok(LoadedConfig {
            config,
            path: Some(path.to_path_buf()),
            exists: true,
        });
    }

    let path = default_config_path();
    match path {
        Some(path) if path.is_file() => {
            let config = read_config(&path)?;
            Ok(LoadedConfig {
                config,
                path: Some(path),
                exists: true,
            })
        }
        path => Ok(LoadedConfig {
            config: AppConfig::default(),
            path,
            exists: false,
        }),
    }
}

pub fn read_config(path: &Path) -> Result<AppConfig, RdCompareError> {
    let data = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&data).map_err(|e| RdCompareError::Serialization(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "rdcompare", "rdcompare")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OverflowPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_load_explicit_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(
            &path,
            "diff_tool = \"mydiff\"\nmax_entries = 16\noverflow = \"error\"\n",
        )
        .unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert!(loaded.exists);
        assert_eq!(loaded.config.diff_tool, "mydiff");
        assert_eq!(loaded.config.max_entries, 16);
        assert_eq!(loaded.config.overflow, OverflowPolicy::Error);
    }

    #[test]
    fn test_load_missing_explicit_config_fails() {
        let temp = TempDir::new().unwrap();
        let result = load_config(Some(&temp.path().join("absent.toml")));
        assert!(matches!(result, Err(RdCompareError::Config(_))));
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        fs::write(&path, "max_entries = \"many\"").unwrap();

        assert!(matches!(
            read_config(&path),
            Err(RdCompareError::Serialization(_))
        ));
    }

    #[test]
    fn test_out_of_range_capacity_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("big.toml");
        fs::write(&path, "max_entries = 4096").unwrap();

        assert!(matches!(read_config(&path), Err(RdCompareError::Config(_))));
    }
}
