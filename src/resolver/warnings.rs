//! Accepted-but-noteworthy findings carried alongside an emitted plan.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A condition that does not reject the plan but should be visible to
/// whoever consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanWarning {
    /// The plan publishes under an id other than the canonical one
    IdentityOverridden { canonical: String, effective: String },

    /// The variant's signing reference came from the fallback variant
    SigningInherited {
        variant: String,
        from: String,
        signing_ref: String,
    },

    /// An explicit variant minimum is below what a plugin asked for
    MinBelowPluginFloor {
        variant: String,
        min_supported: u32,
        floor: u32,
        plugin: String,
    },

    /// A non-fallback variant is signed with a debug identity
    DebugSigningIdentity { variant: String, signing_ref: String },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::IdentityOverridden {
                canonical,
                effective,
            } => write!(
                f,
                "publishing as `{}` instead of canonical `{}`",
                effective, canonical
            ),
            PlanWarning::SigningInherited {
                variant,
                from,
                signing_ref,
            } => write!(
                f,
                "variant `{}` inherits signing identity `{}` from `{}`",
                variant, signing_ref, from
            ),
            PlanWarning::MinBelowPluginFloor {
                variant,
                min_supported,
                floor,
                plugin,
            } => write!(
                f,
                "variant `{}` sets min-supported {} below {} required by plugin `{}`",
                variant, min_supported, floor, plugin
            ),
            PlanWarning::DebugSigningIdentity {
                variant,
                signing_ref,
            } => write!(
                f,
                "variant `{}` is signed with debug identity `{}`",
                variant, signing_ref
            ),
        }
    }
}
