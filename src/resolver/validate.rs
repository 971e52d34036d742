//! Compatibility validation for resolved plans.
//!
//! Four independent checks run on every plan:
//! 1. Version range - `min-supported <= target <= compile-target`
//! 2. Plugin requirements - each plugin against the compile target and
//!    native toolchain
//! 3. Signing - the signing reference resolves through the injected provider
//! 4. Identity - the canonical (and effective) id are declared
//!
//! Every violation is collected. Validation is pure apart from the signing
//! lookup, so running it twice on the same plan yields the same result.

use crate::resolver::errors::{CompatibilityError, IdentityField, PluginRequirement};
use crate::resolver::plan::{BuildPlan, Layer};
use crate::resolver::warnings::PlanWarning;
use crate::core::variant::SigningSource;
use crate::signing::{SigningIdentity, SigningIdentityProvider};

/// A plan that passed validation, with its warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPlan {
    pub plan: BuildPlan,
    pub warnings: Vec<PlanWarning>,
}

/// Validates plans against hard compatibility constraints.
pub struct Validator<'a> {
    signing: &'a dyn SigningIdentityProvider,
}

impl<'a> Validator<'a> {
    /// Create a validator using the given signing identity provider.
    pub fn new(signing: &'a dyn SigningIdentityProvider) -> Self {
        Validator { signing }
    }

    /// Validate a plan, returning warnings on success or every error found.
    pub fn validate(&self, plan: &BuildPlan) -> Result<Vec<PlanWarning>, Vec<CompatibilityError>> {
        let mut errors = Vec::new();

        check_version_range(plan, &mut errors);
        check_plugin_requirements(plan, &mut errors);
        let identity = self.check_signing(plan, &mut errors);
        check_identity(plan, &mut errors);

        if errors.is_empty() {
            Ok(collect_warnings(plan, identity.as_ref()))
        } else {
            tracing::debug!(
                "variant `{}` rejected with {} errors",
                plan.variant.name,
                errors.len()
            );
            Err(errors)
        }
    }

    /// Validate and take ownership of an accepted plan.
    pub fn accept(&self, plan: BuildPlan) -> Result<ValidatedPlan, Vec<CompatibilityError>> {
        let warnings = self.validate(&plan)?;
        Ok(ValidatedPlan { plan, warnings })
    }

    fn check_signing(
        &self,
        plan: &BuildPlan,
        errors: &mut Vec<CompatibilityError>,
    ) -> Option<SigningIdentity> {
        let variant = &plan.variant;

        let Some(ref name) = variant.signing_ref else {
            let reason = match variant.signing_source {
                SigningSource::Unset if variant.is_fallback => {
                    "the fallback variant declares no signing reference".to_string()
                }
                _ => "no signing reference declared and no fallback variant provides one"
                    .to_string(),
            };
            errors.push(CompatibilityError::UnresolvedSigningIdentity {
                variant: variant.name.clone(),
                signing_ref: None,
                signing_source: variant.signing_source.clone(),
                reason,
            });
            return None;
        };

        match self.signing.lookup(name) {
            Ok(identity) => Some(identity),
            Err(not_found) => {
                errors.push(CompatibilityError::UnresolvedSigningIdentity {
                    variant: variant.name.clone(),
                    signing_ref: Some(name.clone()),
                    signing_source: variant.signing_source.clone(),
                    reason: not_found.to_string(),
                });
                None
            }
        }
    }
}

fn check_version_range(plan: &BuildPlan, errors: &mut Vec<CompatibilityError>) {
    let toolchain = &plan.toolchain;
    let min = &toolchain.min_supported_version;
    let target = &toolchain.target_version;
    let compile = &toolchain.compile_target_version;

    if min.value > target.value || target.value > compile.value {
        errors.push(CompatibilityError::VersionRangeViolation {
            variant: plan.variant.name.clone(),
            min: min.clone(),
            target: target.clone(),
            compile: compile.clone(),
        });
    }
}

fn check_plugin_requirements(plan: &BuildPlan, errors: &mut Vec<CompatibilityError>) {
    let compile = &plan.toolchain.compile_target_version;
    let native = &plan.toolchain.native_toolchain_version;
    let native_version = semver::Version::parse(&native.value).ok();

    for plugin in &plan.plugins {
        if plugin.required_min_toolchain > compile.value {
            errors.push(CompatibilityError::UnsatisfiedPluginRequirement {
                plugin: plugin.name.clone(),
                requirement: PluginRequirement::MinToolchain {
                    required: plugin.required_min_toolchain,
                    compile_target: compile.clone(),
                },
            });
        }

        if let Some(ref req) = plugin.native_toolchain {
            // An unparseable native version satisfies no requirement.
            let satisfied = native_version.as_ref().is_some_and(|v| req.matches(v));
            if !satisfied {
                errors.push(CompatibilityError::UnsatisfiedPluginRequirement {
                    plugin: plugin.name.clone(),
                    requirement: PluginRequirement::NativeToolchain {
                        required: req.clone(),
                        actual: native.clone(),
                    },
                });
            }
        }
    }
}

/// Blank ids (empty or whitespace only) are reported as missing.
fn check_identity(plan: &BuildPlan, errors: &mut Vec<CompatibilityError>) {
    let identity = &plan.identity;

    if identity.canonical_id.trim().is_empty() {
        errors.push(CompatibilityError::MissingCanonicalIdentity {
            field: IdentityField::Canonical,
            canonical: identity.canonical_id.clone(),
            effective: identity.effective_id.clone(),
        });
    }

    if identity.effective_id.trim().is_empty() {
        errors.push(CompatibilityError::MissingCanonicalIdentity {
            field: IdentityField::Effective,
            canonical: identity.canonical_id.clone(),
            effective: identity.effective_id.clone(),
        });
    }
}

fn collect_warnings(plan: &BuildPlan, identity: Option<&SigningIdentity>) -> Vec<PlanWarning> {
    let mut warnings = Vec::new();
    let variant = &plan.variant;

    if plan.identity.is_overridden() {
        warnings.push(PlanWarning::IdentityOverridden {
            canonical: plan.identity.canonical_id.clone(),
            effective: plan.identity.effective_id.clone(),
        });
    }

    if let (SigningSource::Inherited { from }, Some(signing_ref)) =
        (&variant.signing_source, &variant.signing_ref)
    {
        warnings.push(PlanWarning::SigningInherited {
            variant: variant.name.clone(),
            from: from.clone(),
            signing_ref: signing_ref.clone(),
        });
    }

    let min = &plan.toolchain.min_supported_version;
    if let (Layer::Variant(_), Some(floor)) = (&min.origin, &plan.plugin_floor) {
        if min.value < floor.value {
            warnings.push(PlanWarning::MinBelowPluginFloor {
                variant: variant.name.clone(),
                min_supported: min.value,
                floor: floor.value,
                plugin: floor.plugin.clone(),
            });
        }
    }

    if let Some(identity) = identity {
        if identity.is_debug() && !variant.is_fallback {
            warnings.push(PlanWarning::DebugSigningIdentity {
                variant: variant.name.clone(),
                signing_ref: identity.name.clone(),
            });
        }
    }

    warnings
}
