//! Compatibility errors found while validating a plan.
//!
//! All of these are collected: validation never stops at the first one.
//! Each error names the layer, the field and the conflicting values so the
//! input can be fixed without another speculative run.

use std::fmt;

use semver::VersionReq;
use thiserror::Error;

use crate::core::variant::SigningSource;
use crate::resolver::plan::{Layer, Resolved};
use crate::util::diagnostic::Diagnostic;

/// The identity field a `MissingCanonicalIdentity` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    Canonical,
    Effective,
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityField::Canonical => write!(f, "canonical"),
            IdentityField::Effective => write!(f, "effective"),
        }
    }
}

/// What a plugin asked for that the plan does not provide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginRequirement {
    /// Minimum toolchain above the plan's compile target
    MinToolchain {
        required: u32,
        compile_target: Resolved<u32>,
    },
    /// Native toolchain version outside the plugin's accepted range
    NativeToolchain {
        required: VersionReq,
        actual: Resolved<String>,
    },
}

impl fmt::Display for PluginRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginRequirement::MinToolchain {
                required,
                compile_target,
            } => write!(
                f,
                "requires toolchain {} but compile-target is {}",
                required, compile_target
            ),
            PluginRequirement::NativeToolchain { required, actual } => write!(
                f,
                "requires native-toolchain `{}` but native-toolchain is `{}` ({})",
                required, actual.value, actual.origin
            ),
        }
    }
}

/// A hard constraint the resolved plan violates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompatibilityError {
    #[error(
        "version range violated for variant `{variant}`: expected min-supported {min} <= target {target} <= compile-target {compile}"
    )]
    VersionRangeViolation {
        variant: String,
        min: Resolved<u32>,
        target: Resolved<u32>,
        compile: Resolved<u32>,
    },

    #[error("plugin `{plugin}` {requirement}")]
    UnsatisfiedPluginRequirement {
        plugin: String,
        requirement: PluginRequirement,
    },

    #[error("variant `{variant}` has unresolved signing identity {}: {reason}", describe_ref(signing_ref.as_deref(), signing_source))]
    UnresolvedSigningIdentity {
        variant: String,
        signing_ref: Option<String>,
        signing_source: SigningSource,
        reason: String,
    },

    #[error("{field} identity is empty (canonical: `{canonical}`, effective: `{effective}`)")]
    MissingCanonicalIdentity {
        field: IdentityField,
        canonical: String,
        effective: String,
    },
}

fn describe_ref(signing_ref: Option<&str>, source: &SigningSource) -> String {
    match signing_ref {
        Some(name) => format!("`{}` ({})", name, source),
        None => "(none declared)".to_string(),
    }
}

impl CompatibilityError {
    /// Stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CompatibilityError::VersionRangeViolation { .. } => "VersionRangeViolation",
            CompatibilityError::UnsatisfiedPluginRequirement { .. } => {
                "UnsatisfiedPluginRequirement"
            }
            CompatibilityError::UnresolvedSigningIdentity { .. } => "UnresolvedSigningIdentity",
            CompatibilityError::MissingCanonicalIdentity { .. } => "MissingCanonicalIdentity",
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompatibilityError::VersionRangeViolation {
                variant,
                min,
                target,
                compile,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "toolchain versions are out of order for variant `{}`",
                    variant
                ))
                .with_context(format!("min-supported = {}", min))
                .with_context(format!("target = {}", target))
                .with_context(format!("compile-target = {}", compile));

                if min.value > target.value {
                    diag = diag.with_suggestion(match &min.origin {
                        Layer::Plugin(plugin) => format!(
                            "Raise `target` to at least {} (required by plugin `{}`)",
                            min.value, plugin
                        ),
                        _ => format!("Lower `min-supported` to at most {}", target.value),
                    });
                }
                if target.value > compile.value {
                    diag = diag.with_suggestion(format!(
                        "Raise `compile-target` to at least {}",
                        target.value
                    ));
                }
                diag
            }

            CompatibilityError::UnsatisfiedPluginRequirement {
                plugin,
                requirement,
            } => {
                let diag = Diagnostic::error(format!(
                    "plugin `{}` cannot run with this toolchain",
                    plugin
                ))
                .with_context(format!("`{}` {}", plugin, requirement));

                match requirement {
                    PluginRequirement::MinToolchain { required, .. } => diag
                        .with_suggestion(format!("Raise `compile-target` to at least {}", required))
                        .with_suggestion(format!(
                            "Use a version of `{}` that supports older toolchains",
                            plugin
                        )),
                    PluginRequirement::NativeToolchain { required, .. } => diag.with_suggestion(
                        format!("Set `native-toolchain` to a version matching `{}`", required),
                    ),
                }
            }

            CompatibilityError::UnresolvedSigningIdentity {
                variant,
                signing_ref,
                signing_source,
                reason,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "variant `{}` cannot be signed",
                    variant
                ))
                .with_context(reason.clone());

                if let Some(name) = signing_ref {
                    diag = diag
                        .with_context(format!("signing reference `{}` is {}", name, signing_source))
                        .with_suggestion(format!(
                            "Declare `[signing.identities.{}]` in .stevedore/config.toml",
                            name
                        ));
                }
                diag.with_suggestion(format!(
                    "Set `signing` on variant `{}` to a known identity",
                    variant
                ))
            }

            CompatibilityError::MissingCanonicalIdentity {
                field,
                canonical,
                effective,
            } => Diagnostic::error(format!("{} identity is not declared", field))
                .with_context(format!("canonical = `{}`", canonical))
                .with_context(format!("effective = `{}`", effective))
                .with_suggestion(match field {
                    IdentityField::Canonical => {
                        "Declare `canonical` in [identity]; it is required even when `effective` overrides it"
                    }
                    IdentityField::Effective => {
                        "Set `effective` to the id registered with the external service"
                    }
                }),
        }
    }
}
