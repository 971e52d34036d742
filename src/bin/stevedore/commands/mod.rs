//! Command implementations

pub mod check;
pub mod completions;
pub mod init;
pub mod plugins;
pub mod resolve;
pub mod variants;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;

use stevedore::core::Manifest;
use stevedore::ops::Rejection;
use stevedore::resolver::PlanWarning;
use stevedore::util::diagnostic::{report, suggestions, Diagnostic};
use stevedore::util::{Config, GlobalContext};

/// One or more variants failed validation. Details are already on stderr.
#[derive(Debug)]
pub struct Rejected {
    pub variants: Vec<String>,
    pub errors: usize,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variants: Vec<_> = self.variants.iter().map(|v| format!("`{}`", v)).collect();
        write!(
            f,
            "could not resolve {} due to {} previous error{}",
            variants.join(", "),
            self.errors,
            if self.errors == 1 { "" } else { "s" }
        )
    }
}

impl std::error::Error for Rejected {}

impl Rejected {
    pub fn from_rejections<'a>(rejections: impl IntoIterator<Item = &'a Rejection>) -> Self {
        let mut rejected = Rejected {
            variants: Vec::new(),
            errors: 0,
        };
        for rejection in rejections {
            rejected.variants.push(rejection.variant.clone());
            rejected.errors += rejection.errors.len();
        }
        rejected
    }
}

/// Per-invocation state shared by the commands.
pub struct Session {
    ctx: GlobalContext,
    manifest: Option<PathBuf>,
}

impl Session {
    pub fn new(manifest: Option<PathBuf>, verbose: bool, color: bool) -> Result<Self> {
        let mut ctx = GlobalContext::new()?;
        ctx.set_verbose(verbose);
        ctx.set_color(color);
        Ok(Session { ctx, manifest })
    }

    pub fn ctx(&self) -> &GlobalContext {
        &self.ctx
    }

    /// Locate and load the descriptor.
    pub fn load_manifest(&self) -> Result<Manifest> {
        let path = self.ctx.manifest_path(self.manifest.as_deref())?;
        Ok(Manifest::load(&path)?)
    }

    /// Configuration for the project owning `manifest`.
    pub fn config(&self, manifest: &Manifest) -> Config {
        let root = manifest.manifest_dir().unwrap_or(self.ctx.cwd());
        self.ctx.load_config(root)
    }

    /// Print every error of a rejected variant, one per line.
    pub fn report_rejection(&self, rejection: &Rejection) {
        for error in &rejection.errors {
            if self.ctx.is_verbose() {
                report(&error.to_diagnostic(), self.ctx.color());
            } else {
                eprintln!("error: {}", error);
            }
        }
        if self.ctx.is_verbose() {
            let mut hint = Diagnostic::warning(format!(
                "variant `{}` rejected",
                rejection.variant
            ))
            .with_suggestion(suggestions::CHECK_PLAN);
            if rejection
                .errors
                .iter()
                .any(|e| e.kind() == "UnresolvedSigningIdentity")
            {
                hint = hint.with_suggestion(suggestions::SIGNING_CONFIG);
            }
            report(&hint, self.ctx.color());
        }
    }

    /// Print plan warnings for a variant.
    pub fn report_warnings(&self, variant: &str, warnings: &[PlanWarning]) {
        for warning in warnings {
            let diag = Diagnostic::warning(warning.to_string());
            let diag = if self.ctx.is_verbose() {
                diag.with_context(format!("variant `{}`", variant))
            } else {
                diag
            };
            report(&diag, self.ctx.color());
        }
    }
}

/// Resolve an output path against the working directory.
pub fn output_path(ctx: &GlobalContext, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        ctx.cwd().join(path)
    }
}
