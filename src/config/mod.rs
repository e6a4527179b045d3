//! Configuration module for vidsift
//!
//! Settings are layered, lowest priority first:
//!
//! 1. built-in defaults
//! 2. `config.toml` in the user's config directory (or the file given with
//!    `--config`)
//! 3. `VIDSIFT_*` environment variables, e.g. `VIDSIFT_THREADS=8`
//!
//! Command-line flags override all of these in `main`.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default directory for `--filelist` without a value
pub const DEFAULT_FILELIST_DIR: &str = "/tmp/";
/// Default file name for `--filelist`
pub const DEFAULT_FILELIST_NAME: &str = "video-filelist.txt";

/// Application configuration structure
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct VidsiftConfig {
    /// Worker pool size; the number of CPUs when unset
    #[serde(default)]
    pub threads: Option<usize>,

    /// Probe program to run
    #[serde(default = "default_ffprobe")]
    pub ffprobe: String,

    #[serde(default = "default_filelist_dir")]
    pub filelist_dir: PathBuf,

    #[serde(default = "default_filelist_name")]
    pub filelist_name: String,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Also probe partial downloads (`.part`, `.crdownload`, ...)
    #[serde(default)]
    pub include_partial: bool,

    /// Extra extensions to treat as video
    #[serde(default)]
    pub extra_extensions: Vec<String>,

    #[serde(default)]
    pub follow_links: bool,
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

fn default_filelist_dir() -> PathBuf {
    PathBuf::from(DEFAULT_FILELIST_DIR)
}

fn default_filelist_name() -> String {
    DEFAULT_FILELIST_NAME.to_string()
}

impl Default for VidsiftConfig {
    fn default() -> Self {
        Self {
            threads: None,
            ffprobe: default_ffprobe(),
            filelist_dir: default_filelist_dir(),
            filelist_name: default_filelist_name(),
            quiet: false,
            include_partial: false,
            extra_extensions: Vec::new(),
            follow_links: false,
        }
    }
}

impl VidsiftConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("vidsift").join("config.toml"))
    }

    /// Load configuration from the default location. A missing file is not
    /// an error; defaults and environment overrides still apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file exists but cannot be parsed,
    /// or an environment override has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::build(&path, false, env_source())
    }

    /// Load configuration from an explicit file, which must exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(path, true, env_source())
    }

    fn build(path: &Path, required: bool, env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(env)
            .build()?;

        settings.try_deserialize()
    }

    /// Worker pool size to use
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("VIDSIFT")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("extra_extensions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    fn no_env() -> Environment {
        env_source().source(Some(HashMap::new()))
    }

    #[test]
    fn test_default_config() {
        let config = VidsiftConfig::default();
        assert_eq!(config.threads, None);
        assert_eq!(config.ffprobe, "ffprobe");
        assert_eq!(config.filelist_dir, PathBuf::from("/tmp/"));
        assert_eq!(config.filelist_name, "video-filelist.txt");
        assert!(config.concurrency() >= 1);
    }

    #[test]
    fn test_missing_default_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = VidsiftConfig::build(&dir.path().join("config.toml"), false, no_env()).unwrap();
        assert_eq!(config, VidsiftConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = VidsiftConfig::load_from(&dir.path().join("missing.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "threads = 3\nextra_extensions = [\"y4m\"]\n").unwrap();

        let config = VidsiftConfig::build(&path, true, no_env()).unwrap();
        assert_eq!(config.threads, Some(3));
        assert_eq!(config.concurrency(), 3);
        assert_eq!(config.extra_extensions, vec!["y4m".to_string()]);
        assert_eq!(config.ffprobe, "ffprobe");
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "threads = 3\nffprobe = \"/usr/bin/ffprobe\"\n").unwrap();

        let env = env_source().source(Some(HashMap::from([
            ("VIDSIFT_THREADS".to_string(), "12".to_string()),
            ("VIDSIFT_QUIET".to_string(), "true".to_string()),
        ])));
        let config = VidsiftConfig::build(&path, true, env).unwrap();
        assert_eq!(config.threads, Some(12));
        assert!(config.quiet);
        assert_eq!(config.ffprobe, "/usr/bin/ffprobe");
    }
}
