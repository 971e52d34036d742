//! Global context for Stevedore operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::error::InputError;
use crate::core::manifest::find_manifest as find_manifest_from;
use crate::util::config::{load_config, Config};

/// Environment variable overriding the global Stevedore directory.
pub const HOME_ENV: &str = "STEVEDORE_HOME";

/// Project-local configuration directory name.
pub const PROJECT_DIR: &str = ".stevedore";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global Stevedore data (~/.stevedore/)
    home: PathBuf,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = match std::env::var_os(HOME_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => directories::BaseDirs::new()
                .map(|b| b.home_dir().join(PROJECT_DIR))
                .unwrap_or_else(|| PathBuf::from(PROJECT_DIR)),
        };

        Ok(GlobalContext {
            cwd,
            home,
            verbose: false,
            color: true,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Use a specific global directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the Stevedore home directory (~/.stevedore/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project configuration file path for a project root.
    pub fn project_config_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR).join("config.toml")
    }

    /// Load global and project configuration, project winning.
    pub fn load_config(&self, project_root: &Path) -> Config {
        load_config(&self.config_path(), &self.project_config_path(project_root))
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find `Stevedore.toml` starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, InputError> {
        find_manifest_from(&self.cwd).ok_or_else(|| InputError::ManifestNotFound {
            dir: self.cwd.clone(),
        })
    }

    /// Resolve an explicit manifest path against cwd, or search for one.
    pub fn manifest_path(&self, explicit: Option<&Path>) -> Result<PathBuf, InputError> {
        match explicit {
            Some(path) if path.is_absolute() => Ok(path.to_path_buf()),
            Some(path) => Ok(self.cwd.join(path)),
            None => self.find_manifest(),
        }
    }
}
