//! Resolved build plan types.
//!
//! A `BuildPlan` is the single immutable record produced by one merge. Every
//! resolved toolchain field carries the layer it came from, and the original
//! base descriptor and variant overrides are kept alongside so no input
//! property disappears from the output.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::identity::{AppVersion, IdentityOverride};
use crate::core::plugin::PluginActivation;
use crate::core::toolchain::{ToolchainDescriptor, ToolchainOverrides};
use crate::core::variant::SigningSource;

/// The input layer a resolved value was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Layer {
    /// Base toolchain descriptor default
    Base,
    /// Minimum raised by the named plugin
    Plugin(String),
    /// Explicit value on the named variant
    Variant(String),
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Base => write!(f, "base"),
            Layer::Plugin(name) => write!(f, "plugin:{}", name),
            Layer::Variant(name) => write!(f, "variant:{}", name),
        }
    }
}

impl From<Layer> for String {
    fn from(layer: Layer) -> Self {
        layer.to_string()
    }
}

/// Error returned when parsing an invalid layer string.
#[derive(Debug, Clone, Error)]
#[error("invalid layer '{0}', expected `base`, `plugin:<name>` or `variant:<name>`")]
pub struct LayerParseError(pub String);

impl TryFrom<String> for Layer {
    type Error = LayerParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s == "base" {
            return Ok(Layer::Base);
        }
        match s.split_once(':') {
            Some(("plugin", name)) if !name.is_empty() => Ok(Layer::Plugin(name.to_string())),
            Some(("variant", name)) if !name.is_empty() => Ok(Layer::Variant(name.to_string())),
            _ => Err(LayerParseError(s)),
        }
    }
}

/// A resolved value and the layer that supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolved<T> {
    pub value: T,
    pub origin: Layer,
}

impl<T> Resolved<T> {
    pub fn new(value: T, origin: Layer) -> Self {
        Resolved { value, origin }
    }

    pub fn base(value: T) -> Self {
        Resolved::new(value, Layer::Base)
    }
}

impl<T: fmt::Display> fmt::Display for Resolved<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value, self.origin)
    }
}

/// Toolchain values after precedence resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedToolchain {
    pub compile_target_version: Resolved<u32>,
    pub min_supported_version: Resolved<u32>,
    pub target_version: Resolved<u32>,
    pub native_toolchain_version: Resolved<String>,
    pub language_level: Resolved<String>,
}

/// The highest minimum toolchain declared by any plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginFloor {
    pub value: u32,
    pub plugin: String,
}

/// The variant a plan was resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVariant {
    pub name: String,
    pub signing_ref: Option<String>,
    pub signing_source: SigningSource,
    /// Whether this variant is the designated signing fallback
    pub is_fallback: bool,
}

/// A fully merged build plan for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    /// Variant this plan builds
    pub variant: ResolvedVariant,

    /// Toolchain after precedence resolution
    pub toolchain: ResolvedToolchain,

    /// Plugin floor, absent when no plugins are active
    pub plugin_floor: Option<PluginFloor>,

    /// Plugin activations in activation order
    pub plugins: Vec<PluginActivation>,

    /// Application identity
    pub identity: IdentityOverride,

    /// Application version
    pub version: Option<AppVersion>,

    /// Base descriptor as declared
    pub base: ToolchainDescriptor,

    /// Variant overrides as declared
    pub overrides: ToolchainOverrides,
}

impl BuildPlan {
    /// Plugin names in activation order.
    pub fn activation_order(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.name.clone()).collect()
    }

    /// Set the application version.
    pub fn with_version(mut self, version: Option<AppVersion>) -> Self {
        self.version = version;
        self
    }
}
