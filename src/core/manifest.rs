//! Stevedore.toml descriptor parsing.
//!
//! The manifest carries all three input layers: the base `[toolchain]`,
//! the ordered `[[plugins]]` activations, and the `[[variants]]` with the
//! `[identity]` override. Loading registers plugins in file order, so a
//! repeated plugin name is rejected here, before any merge.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::InputError;
use crate::core::identity::{AppVersion, IdentityOverride};
use crate::core::plugin::PluginActivation;
use crate::core::toolchain::ToolchainDescriptor;
use crate::core::variant::{VariantConfig, VariantTable};
use crate::registry::{FrozenRegistry, PluginRegistry};

/// Descriptor file name.
pub const MANIFEST_NAME: &str = "Stevedore.toml";

/// The parsed descriptor: every input layer of a resolution run.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Base toolchain layer
    pub toolchain: ToolchainDescriptor,

    /// Plugin layer, frozen in activation order
    pub plugins: FrozenRegistry,

    /// Application identity (one per plan, not per variant)
    pub identity: IdentityOverride,

    /// Variant layer
    pub variants: VariantTable,

    /// Application version, passed through
    pub version: Option<AppVersion>,

    /// The file this manifest was loaded from, if any
    pub path: Option<PathBuf>,
}

/// Raw manifest as deserialized from TOML.
#[derive(Debug, Deserialize)]
struct RawManifest {
    toolchain: ToolchainDescriptor,

    #[serde(default)]
    plugins: Vec<PluginActivation>,

    #[serde(default)]
    identity: RawIdentity,

    #[serde(default)]
    variants: Vec<VariantConfig>,

    #[serde(default)]
    version: Option<AppVersion>,
}

/// Raw `[identity]` table; `effective` defaults to `canonical`.
#[derive(Debug, Default, Deserialize)]
struct RawIdentity {
    #[serde(default)]
    canonical: String,

    #[serde(default)]
    effective: Option<String>,
}

impl Manifest {
    /// Assemble a manifest from already-built layers.
    pub fn new(
        toolchain: ToolchainDescriptor,
        plugins: FrozenRegistry,
        identity: IdentityOverride,
        variants: VariantTable,
    ) -> Self {
        Manifest {
            toolchain,
            plugins,
            identity,
            variants,
            version: None,
            path: None,
        }
    }

    /// Set the application version.
    pub fn with_version(mut self, version: AppVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let content = std::fs::read_to_string(path).map_err(|source| InputError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Parse manifest content.
    pub fn parse(content: &str, path: &Path) -> Result<Self, InputError> {
        let raw: RawManifest = toml::from_str(content).map_err(|e| InputError::Parse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;

        let mut registry = PluginRegistry::new();
        for (i, activation) in raw.plugins.into_iter().enumerate() {
            if activation.name.is_empty() {
                return Err(InputError::EmptyName {
                    layer: "plugins",
                    index: i + 1,
                });
            }
            registry.register(activation)?;
        }

        let identity = match raw.identity.effective {
            Some(effective) => IdentityOverride::new(raw.identity.canonical, effective),
            None => IdentityOverride::canonical(raw.identity.canonical),
        };

        let variants = VariantTable::new(raw.variants)?;

        tracing::debug!(
            "loaded {} with {} plugins and {} variants",
            path.display(),
            registry.len(),
            variants.len()
        );

        Ok(Manifest {
            toolchain: raw.toolchain,
            plugins: registry.freeze(),
            identity,
            variants,
            version: raw.version,
            path: Some(path.to_path_buf()),
        })
    }

    /// The directory containing the manifest file.
    pub fn manifest_dir(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }
}

/// Find `Stevedore.toml` in `start` or any of its ancestors.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_NAME))
        .find(|candidate| candidate.is_file())
}

/// Generate a starter manifest for an application id.
pub fn generate_manifest(app_id: &str) -> String {
    format!(
        r#"[toolchain]
compile-target = 35
min-supported = 23
target = 35
native-toolchain = "27.0.12077973"
language-level = "11"

[[plugins]]
name = "com.android.application"
required-min-toolchain = 21
ordered = true

[[plugins]]
name = "kotlin-android"
required-min-toolchain = 21
ordered = true

[identity]
canonical = "{app_id}"

[[variants]]
name = "debug"
signing = "debug"

[[variants]]
name = "release"
"#
    )
}
