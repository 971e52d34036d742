//! Resolution runs.
//!
//! One run resolves one variant and moves through
//! `Collecting -> Merging -> Validating -> {Emitted | Rejected}`.
//! There are no retries: a rejected run reports every error it found and
//! stops. Runs share nothing mutable, so several variants of the same
//! manifest can be resolved concurrently.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::core::manifest::Manifest;
use crate::emit::{PlanEmitter, SerializedPlan};
use crate::resolver::{merge, CompatibilityError, ValidatedPlan, Validator};
use crate::signing::SigningIdentityProvider;
use crate::util::hash;

/// Where a resolution run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Collecting,
    Merging,
    Validating,
    Emitted,
    Rejected,
}

impl RunState {
    /// Whether the run has finished.
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Emitted | RunState::Rejected)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Collecting => write!(f, "collecting"),
            RunState::Merging => write!(f, "merging"),
            RunState::Validating => write!(f, "validating"),
            RunState::Emitted => write!(f, "emitted"),
            RunState::Rejected => write!(f, "rejected"),
        }
    }
}

/// A plan that was accepted and serialized.
#[derive(Debug, Clone)]
pub struct EmittedPlan {
    pub variant: String,
    pub plan: ValidatedPlan,
    pub serialized: SerializedPlan,
}

/// A plan that failed validation.
#[derive(Debug, Clone)]
pub struct Rejection {
    pub variant: String,
    pub errors: Vec<CompatibilityError>,
}

/// The terminal result of one run.
#[derive(Debug, Clone)]
pub enum ResolveOutcome {
    Emitted(EmittedPlan),
    Rejected(Rejection),
}

impl ResolveOutcome {
    pub fn state(&self) -> RunState {
        match self {
            ResolveOutcome::Emitted(_) => RunState::Emitted,
            ResolveOutcome::Rejected(_) => RunState::Rejected,
        }
    }

    pub fn variant(&self) -> &str {
        match self {
            ResolveOutcome::Emitted(emitted) => &emitted.variant,
            ResolveOutcome::Rejected(rejection) => &rejection.variant,
        }
    }

    pub fn is_emitted(&self) -> bool {
        matches!(self, ResolveOutcome::Emitted(_))
    }
}

/// State tracking for a single run.
struct Run<'a> {
    variant: &'a str,
    state: RunState,
}

impl<'a> Run<'a> {
    fn start(variant: &'a str) -> Self {
        tracing::debug!("variant `{}`: {}", variant, RunState::Collecting);
        Run {
            variant,
            state: RunState::Collecting,
        }
    }

    fn advance(&mut self, next: RunState) {
        debug_assert!(!self.state.is_terminal());
        tracing::debug!("variant `{}`: {} -> {}", self.variant, self.state, next);
        self.state = next;
    }
}

/// Resolve one variant of a manifest.
///
/// Returns `Err` only for malformed input (an unknown variant) or when the
/// accepted plan cannot be serialized. A plan that fails validation is an
/// `Ok(ResolveOutcome::Rejected)`.
pub fn resolve_variant(
    manifest: &Manifest,
    variant: &str,
    signing: &dyn SigningIdentityProvider,
    emitter: &PlanEmitter,
) -> Result<ResolveOutcome> {
    let mut run = Run::start(variant);

    let selection = manifest.variants.select(variant)?;

    run.advance(RunState::Merging);
    let plan = merge(
        &manifest.toolchain,
        &manifest.plugins,
        selection,
        &manifest.identity,
    )
    .with_version(manifest.version.clone());

    run.advance(RunState::Validating);
    let validated = match Validator::new(signing).accept(plan) {
        Ok(validated) => validated,
        Err(errors) => {
            run.advance(RunState::Rejected);
            return Ok(ResolveOutcome::Rejected(Rejection {
                variant: variant.to_string(),
                errors,
            }));
        }
    };

    let serialized = emitter
        .emit(&validated)
        .with_context(|| format!("failed to emit plan for variant `{}`", variant))?;

    run.advance(RunState::Emitted);
    tracing::info!(
        "Emitted plan for `{}` ({})",
        variant,
        hash::short(serialized.hash())
    );

    Ok(ResolveOutcome::Emitted(EmittedPlan {
        variant: variant.to_string(),
        plan: validated,
        serialized,
    }))
}

/// Resolve every declared variant concurrently.
///
/// Outcomes are returned in declaration order.
pub fn resolve_all_variants(
    manifest: &Manifest,
    signing: &dyn SigningIdentityProvider,
    emitter: &PlanEmitter,
) -> Result<Vec<ResolveOutcome>> {
    let names: Vec<&str> = manifest.variants.names().collect();

    names
        .par_iter()
        .map(|name| resolve_variant(manifest, name, signing, emitter))
        .collect()
}

/// File name used for a variant's plan when writing several at once.
pub fn plan_file_name(variant: &str) -> String {
    format!("{}.plan.json", variant)
}

/// Write a serialized plan, creating parent directories.
pub fn write_plan(path: &Path, serialized: &SerializedPlan) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }
    }

    std::fs::write(path, serialized.as_bytes())
        .with_context(|| format!("failed to write plan: {}", path.display()))
}
