//! Precedence merger.
//!
//! For every property present in more than one layer, an explicit variant
//! value wins over a plugin-declared minimum, which wins over the base
//! descriptor. Plugins only ever raise the minimum: the plugin floor is the
//! maximum `required_min_toolchain` across activations, and it replaces the
//! base `min_supported_version` only when it is higher.
//!
//! Merging never fails. Every correctness check is deferred to validation
//! so that a single run can report all problems at once.

use crate::core::identity::IdentityOverride;
use crate::core::toolchain::ToolchainDescriptor;
use crate::core::variant::VariantSelection;
use crate::registry::FrozenRegistry;
use crate::resolver::plan::{
    BuildPlan, Layer, PluginFloor, Resolved, ResolvedToolchain, ResolvedVariant,
};

/// Merge the input layers into a candidate plan.
pub fn merge(
    base: &ToolchainDescriptor,
    plugins: &FrozenRegistry,
    variant: VariantSelection<'_>,
    identity: &IdentityOverride,
) -> BuildPlan {
    let config = variant.variant;
    let overrides = &config.overrides;
    let explicit = || Layer::Variant(config.name.clone());

    let plugin_floor = plugins.floor().map(|p| PluginFloor {
        value: p.required_min_toolchain,
        plugin: p.name.clone(),
    });

    // Plugins raise, never lower, the base minimum.
    let mut min_supported = Resolved::base(base.min_supported_version);
    if let Some(ref floor) = plugin_floor {
        if floor.value > min_supported.value {
            tracing::debug!(
                "plugin `{}` raises min-supported from {} to {}",
                floor.plugin,
                min_supported.value,
                floor.value
            );
            min_supported = Resolved::new(floor.value, Layer::Plugin(floor.plugin.clone()));
        }
    }
    if let Some(value) = overrides.min_supported_version {
        tracing::debug!(
            "variant `{}` sets min-supported to {} (was {})",
            config.name,
            value,
            min_supported
        );
        min_supported = Resolved::new(value, explicit());
    }

    let toolchain = ResolvedToolchain {
        compile_target_version: pick(
            overrides.compile_target_version,
            base.compile_target_version,
            explicit,
        ),
        min_supported_version: min_supported,
        target_version: pick(overrides.target_version, base.target_version, explicit),
        native_toolchain_version: pick(
            overrides.native_toolchain_version.clone(),
            base.native_toolchain_version.clone(),
            explicit,
        ),
        language_level: pick(
            overrides.language_level.clone(),
            base.language_level.clone(),
            explicit,
        ),
    };

    let (signing_ref, signing_source) = variant.signing();
    let is_fallback = variant
        .fallback
        .is_some_and(|fallback| fallback.name == config.name);

    BuildPlan {
        variant: ResolvedVariant {
            name: config.name.clone(),
            signing_ref: signing_ref.map(str::to_string),
            signing_source,
            is_fallback,
        },
        toolchain,
        plugin_floor,
        plugins: plugins.as_slice().to_vec(),
        identity: identity.clone(),
        version: None,
        base: base.clone(),
        overrides: overrides.clone(),
    }
}

/// Take the explicit value if present, else the base default.
fn pick<T>(explicit: Option<T>, base: T, layer: impl Fn() -> Layer) -> Resolved<T> {
    match explicit {
        Some(value) => Resolved::new(value, layer()),
        None => Resolved::base(base),
    }
}
