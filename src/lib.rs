//! Stevedore - resolves layered mobile build descriptors into build plans.
//!
//! A base toolchain descriptor, an ordered set of plugin activations and a
//! per-variant configuration are merged into one [`BuildPlan`], checked
//! against hard compatibility constraints, and serialized for an external
//! build executor.

pub mod core;
pub mod emit;
pub mod ops;
pub mod registry;
pub mod resolver;
pub mod signing;
pub mod util;

/// Test fixtures shared by unit tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    identity::IdentityOverride, manifest::Manifest, plugin::PluginActivation,
    toolchain::ToolchainDescriptor, variant::VariantConfig, InputError,
};

pub use emit::{emit, parse, PlanEmitter, SerializedPlan};
pub use registry::{DuplicateNameError, FrozenRegistry, PluginRegistry};
pub use resolver::{merge, BuildPlan, CompatibilityError, PlanWarning, ValidatedPlan, Validator};
pub use signing::{SigningIdentity, SigningIdentityProvider, StaticSigningProvider};
pub use util::context::GlobalContext;
