//! Configuration loading and management
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: ~/.config/monad/config.toml
//! 3. Project config: .monad/config.toml
//! 4. Environment variables: MONAD_*
//! 5. CLI flags (command-specific)
//!
//! # Example Config
//!
//! ```toml
//! root_url = "https://github.com/nanoservice/monad.go/raw/"
//! version = "v1.2.1"
//! package_prefix = "result"
//! dir_mode = 0o775
//! file_mode = 0o664
//! ```

use std::path::{Path, PathBuf};

use monad_core::Error;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// CONFIGURATION STRUCTURES
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Repository root templates are downloaded from; must end with `/`.
    pub root_url: String,
    /// Default template version (a branch or tag).
    pub version: String,
    /// Extension of template files, remote and local.
    pub template_ext: String,
    /// Extension of rendered files.
    pub output_ext: String,
    /// Prefix of generated package names (`<prefix>_<type>`).
    pub package_prefix: String,
    pub dir_mode: u32,
    pub file_mode: u32,
}

/// A config file where every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    root_url: Option<String>,
    version: Option<String>,
    template_ext: Option<String>,
    output_ext: Option<String>,
    package_prefix: Option<String>,
    dir_mode: Option<u32>,
    file_mode: Option<u32>,
}

// ═══════════════════════════════════════════════════════════════════════════
// DEFAULT IMPLEMENTATIONS
// ═══════════════════════════════════════════════════════════════════════════

impl Default for Config {
    fn default() -> Self {
        Self {
            root_url: "https://github.com/nanoservice/monad.go/raw/".to_string(),
            version: "master".to_string(),
            template_ext: ".go.t".to_string(),
            output_ext: ".t.go".to_string(),
            package_prefix: "result".to_string(),
            dir_mode: 0o775,
            file_mode: 0o664,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

/// Load configuration from all sources with hierarchy
///
/// # Errors
///
/// Returns error if:
/// - Current directory cannot be determined
/// - A config file cannot be read or is malformed TOML
/// - Config values fail validation
pub fn load_config() -> Result<Config, Error> {
    let project_path = project_config_path()?;
    load_config_from(
        global_config_path().as_deref(),
        &project_path,
        |key| std::env::var(key).ok(),
    )
}

/// Load configuration from explicit file locations and an environment lookup.
///
/// Missing files are skipped.
///
/// # Errors
///
/// Returns error if a present file is unreadable or malformed, or if the
/// merged configuration fails validation.
pub fn load_config_from<F>(
    global_path: Option<&Path>,
    project_path: &Path,
    env: F,
) -> Result<Config, Error>
where
    F: Fn(&str) -> Option<String>,
{
    // 1. Start with built-in defaults
    let mut config = Config::default();

    // 2. Load global config if exists
    if let Some(global_path) = global_path.filter(|path| path.exists()) {
        config.merge(load_toml_file(global_path)?);
    }

    // 3. Load project config if exists
    if project_path.exists() {
        config.merge(load_toml_file(project_path)?); // Project overrides global
    }

    // 4. Apply environment variable overrides
    config.apply_env_vars(env);

    // 5. Validate
    config.validate()?;

    Ok(config)
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` naming the first offending key.
    pub fn validate(&self) -> Result<(), Error> {
        if self.root_url.is_empty() {
            return Err(Error::InvalidConfig("root_url cannot be empty".into()));
        }
        if !self.root_url.ends_with('/') {
            return Err(Error::InvalidConfig(format!(
                "root_url must end with '/': {}",
                self.root_url
            )));
        }
        if self.version.is_empty() {
            return Err(Error::InvalidConfig("version cannot be empty".into()));
        }
        if self.template_ext.is_empty() {
            return Err(Error::InvalidConfig("template_ext cannot be empty".into()));
        }
        if self.package_prefix.is_empty() {
            return Err(Error::InvalidConfig("package_prefix cannot be empty".into()));
        }
        Ok(())
    }

    fn merge(&mut self, file: ConfigFile) {
        let ConfigFile {
            root_url,
            version,
            template_ext,
            output_ext,
            package_prefix,
            dir_mode,
            file_mode,
        } = file;

        if let Some(value) = root_url {
            self.root_url = value;
        }
        if let Some(value) = version {
            self.version = value;
        }
        if let Some(value) = template_ext {
            self.template_ext = value;
        }
        if let Some(value) = output_ext {
            self.output_ext = value;
        }
        if let Some(value) = package_prefix {
            self.package_prefix = value;
        }
        if let Some(value) = dir_mode {
            self.dir_mode = value;
        }
        if let Some(value) = file_mode {
            self.file_mode = value;
        }
    }

    fn apply_env_vars<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env("MONAD_ROOT_URL") {
            self.root_url = value;
        }
        if let Some(value) = env("MONAD_VERSION") {
            self.version = value;
        }
        if let Some(value) = env("MONAD_TEMPLATE_EXT") {
            self.template_ext = value;
        }
        if let Some(value) = env("MONAD_PACKAGE_PREFIX") {
            self.package_prefix = value;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HELPER FUNCTIONS
// ═══════════════════════════════════════════════════════════════════════════

/// Get path to global config file
fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "monad")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Get path to project config file
///
/// # Errors
///
/// Returns error if current directory cannot be determined
fn project_config_path() -> Result<PathBuf, Error> {
    std::env::current_dir()
        .map(|dir| dir.join(".monad/config.toml"))
        .map_err(|e| Error::Unknown(format!("Failed to get current directory: {e}")))
}

/// Load a TOML file into a partial config
fn load_toml_file(path: &Path) -> Result<ConfigFile, Error> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::file_read_failed(path, e.to_string()))?;

    toml::from_str(&content).map_err(|e| {
        Error::toml_parse_failed(format!("{}: {}", path.display(), e.message()))
    })
}
