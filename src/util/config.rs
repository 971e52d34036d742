//! Configuration file support for Stevedore.
//!
//! Stevedore supports two configuration file locations:
//! - Global: `~/.stevedore/config.toml` - User-wide defaults
//! - Project: `.stevedore/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Signing identities
//! live here rather than in the descriptor so that keystore paths never end
//! up in a checked-in manifest.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::signing::{SigningIdentity, SigningKind, StaticSigningProvider, DEBUG_IDENTITY};

/// Stevedore configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Signing identities
    pub signing: SigningConfig,

    /// Plan output settings
    pub emit: EmitConfig,
}

/// Signing-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningConfig {
    /// Provide the implicit `debug` identity (default: true)
    #[serde(rename = "builtin-debug")]
    pub builtin_debug: Option<bool>,

    /// Named identities, e.g. `[signing.identities.release-key]`
    pub identities: BTreeMap<String, IdentityConfig>,
}

/// One configured signing identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// `debug` or `release` (default: release)
    pub kind: SigningKind,

    /// Keystore file holding the key
    pub keystore: Option<PathBuf>,

    /// Key alias within the keystore
    pub alias: Option<String>,
}

/// Plan output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    /// Pretty-print emitted plans (default: true)
    pub pretty: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    ///
    /// Identities merge by name; an identity declared in both replaces the
    /// earlier one wholesale.
    pub fn merge(&mut self, other: Config) {
        if other.signing.builtin_debug.is_some() {
            self.signing.builtin_debug = other.signing.builtin_debug;
        }
        self.signing.identities.extend(other.signing.identities);

        if other.emit.pretty.is_some() {
            self.emit.pretty = other.emit.pretty;
        }
    }

    /// Whether plans are pretty-printed.
    pub fn pretty(&self) -> bool {
        self.emit.pretty.unwrap_or(true)
    }

    /// Build the signing provider described by this config.
    pub fn signing_provider(&self) -> StaticSigningProvider {
        let mut provider = StaticSigningProvider::new();

        if self.signing.builtin_debug.unwrap_or(true) {
            provider.insert(SigningIdentity::debug(DEBUG_IDENTITY));
        }

        for (name, identity) in &self.signing.identities {
            provider.insert(SigningIdentity {
                name: name.clone(),
                kind: identity.kind,
                keystore: identity.keystore.clone(),
                alias: identity.alias.clone(),
            });
        }

        provider
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.stevedore/config.toml)
/// 2. Global config (~/.stevedore/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::SigningIdentityProvider;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.signing.identities.is_empty());
        assert!(config.pretty());

        let provider = config.signing_provider();
        assert!(provider.lookup("debug").unwrap().is_debug());
        assert!(provider.lookup("release-key").is_err());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[signing.identities.release-key]
keystore = "keys/release.jks"
alias = "upload"

[signing.identities.qa]
kind = "debug"

[emit]
pretty = false
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert!(!config.pretty());
        assert_eq!(
            config.signing.identities["release-key"],
            IdentityConfig {
                kind: SigningKind::Release,
                keystore: Some(PathBuf::from("keys/release.jks")),
                alias: Some("upload".to_string()),
            }
        );
        assert_eq!(config.signing.identities["qa"].kind, SigningKind::Debug);
    }

    #[test]
    fn test_builtin_debug_can_be_disabled() {
        let config: Config = toml::from_str("[signing]\nbuiltin-debug = false\n").unwrap();
        assert!(config.signing_provider().lookup("debug").is_err());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.signing.identities.insert(
            "release-key".to_string(),
            IdentityConfig {
                alias: Some("old".to_string()),
                ..Default::default()
            },
        );
        base.signing
            .identities
            .insert("nightly".to_string(), IdentityConfig::default());
        base.emit.pretty = Some(false);

        let mut override_cfg = Config::default();
        override_cfg.signing.identities.insert(
            "release-key".to_string(),
            IdentityConfig {
                alias: Some("new".to_string()),
                ..Default::default()
            },
        );

        base.merge(override_cfg);

        assert_eq!(
            base.signing.identities["release-key"].alias.as_deref(),
            Some("new")
        );
        assert!(base.signing.identities.contains_key("nightly"));
        assert!(!base.pretty()); // Not overridden
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[signing]
builtin-debug = false

[signing.identities.release-key]
alias = "global"
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[signing]
builtin-debug = true
"#,
        )
        .unwrap();

        let config = load_config(&global_path, &project_path);
        let provider = config.signing_provider();

        assert!(provider.lookup("debug").is_ok());
        assert_eq!(
            provider.lookup("release-key").unwrap().alias.as_deref(),
            Some("global")
        );
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[signing\n").unwrap();

        let config = Config::load_or_default(&path);
        assert!(config.signing.identities.is_empty());
    }
}
