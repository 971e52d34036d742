//! Core data structures for Stevedore.
//!
//! This module contains the descriptor model the resolver works on:
//! - Toolchain constraints (the base layer)
//! - Plugin activations (the plugin layer)
//! - Variants and their overrides (the variant layer)
//! - The application identity override
//! - The `Stevedore.toml` manifest that carries all of the above

pub mod error;
pub mod identity;
pub mod manifest;
pub mod plugin;
pub mod toolchain;
pub mod variant;

pub use error::InputError;
pub use identity::{AppVersion, IdentityOverride};
pub use manifest::{find_manifest, Manifest, MANIFEST_NAME};
pub use plugin::PluginActivation;
pub use toolchain::{ToolchainDescriptor, ToolchainOverrides};
pub use variant::{VariantConfig, VariantSelection, VariantTable};
