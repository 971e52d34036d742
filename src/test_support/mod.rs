//! Shared fixtures for Stevedore unit tests.
//!
//! Scenario A throughout: base toolchain {min 23, target 35, compile 35},
//! one `analytics` plugin requiring 21, a `release` variant signed with
//! `release-key`, and a legacy published identity.

use crate::core::identity::IdentityOverride;
use crate::core::manifest::Manifest;
use crate::core::plugin::PluginActivation;
use crate::core::toolchain::ToolchainDescriptor;
use crate::core::variant::{VariantConfig, VariantTable};
use crate::registry::FrozenRegistry;
use crate::resolver::{merge, BuildPlan};
use crate::signing::{SigningIdentity, StaticSigningProvider};

/// Descriptor text equivalent to [`scenario_manifest`].
pub const SCENARIO_DESCRIPTOR: &str = r#"
[toolchain]
compile-target = 35
min-supported = 23
target = 35

[[plugins]]
name = "analytics"
required-min-toolchain = 21

[identity]
canonical = "com.example.app"
effective = "com.example.legacyapp"

[[variants]]
name = "debug"
signing = "debug"

[[variants]]
name = "release"
signing = "release-key"
"#;

/// A base descriptor with the given API levels.
pub fn toolchain(min: u32, target: u32, compile: u32) -> ToolchainDescriptor {
    ToolchainDescriptor::new(min, target, compile)
}

/// A frozen registry of unordered plugins, registered in slice order.
pub fn frozen(plugins: &[(&str, u32)]) -> FrozenRegistry {
    FrozenRegistry::from_activations(
        plugins
            .iter()
            .map(|(name, min)| PluginActivation::new(*name, *min)),
    )
    .expect("fixture plugin names must be unique")
}

/// Canonical `com.example.app` published as `com.example.legacyapp`.
pub fn legacy_identity() -> IdentityOverride {
    IdentityOverride::new("com.example.app", "com.example.legacyapp")
}

/// Provider knowing the builtin `debug` identity and `release-key`.
pub fn signing_provider() -> StaticSigningProvider {
    StaticSigningProvider::new()
        .with_identity(SigningIdentity::debug("debug"))
        .with_identity(SigningIdentity::release("release-key"))
}

/// The merged, not yet validated, plan for scenario A.
pub fn scenario_a_plan() -> BuildPlan {
    let base = toolchain(23, 35, 35);
    let plugins = frozen(&[("analytics", 21)]);
    let release = VariantConfig::new("release").with_signing("release-key");
    let debug = VariantConfig::new("debug").with_signing("debug");
    let variants = VariantTable::new(vec![debug, release]).expect("fixture variants are valid");
    let selection = variants.select("release").expect("release is declared");

    merge(&base, &plugins, selection, &legacy_identity())
}

/// Scenario A as a loaded manifest with `debug` and `release` variants.
pub fn scenario_manifest() -> Manifest {
    let variants = VariantTable::new(vec![
        VariantConfig::new("debug").with_signing("debug"),
        VariantConfig::new("release").with_signing("release-key"),
    ])
    .expect("fixture variants are valid");

    Manifest::new(
        toolchain(23, 35, 35),
        frozen(&[("analytics", 21)]),
        legacy_identity(),
        variants,
    )
}
