//! Errors for malformed input layers.
//!
//! Anything reported here aborts a run before merging starts. The CLI maps
//! these to exit code 2.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::registry::DuplicateNameError;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// A descriptor layer that cannot be turned into resolver input.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum InputError {
    #[error("could not find `Stevedore.toml` in `{}` or any parent directory", dir.display())]
    #[diagnostic(code(stevedore::input::no_manifest))]
    ManifestNotFound { dir: PathBuf },

    #[error("failed to read descriptor `{}`", path.display())]
    #[diagnostic(code(stevedore::input::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid descriptor `{}`: {message}", path.display())]
    #[diagnostic(code(stevedore::input::parse))]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    DuplicatePlugin(#[from] DuplicateNameError),

    #[error("{layer} entry {index} has an empty name")]
    #[diagnostic(code(stevedore::input::empty_name))]
    EmptyName { layer: &'static str, index: usize },

    #[error("variant `{name}` is declared more than once")]
    #[diagnostic(code(stevedore::input::duplicate_variant))]
    DuplicateVariant { name: String },

    #[error("variants `{first}` and `{second}` are both marked as the signing fallback")]
    #[diagnostic(code(stevedore::input::multiple_fallbacks))]
    MultipleFallbacks { first: String, second: String },

    #[error("unknown variant `{name}`")]
    #[diagnostic(code(stevedore::input::unknown_variant))]
    UnknownVariant { name: String, known: Vec<String> },
}

impl InputError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());

        match self {
            InputError::ManifestNotFound { .. } => diag.with_suggestion(suggestions::NO_MANIFEST),
            InputError::Read { path, source } => diag
                .with_location(path)
                .with_context(source.to_string()),
            InputError::Parse { path, .. } => diag.with_location(path),
            InputError::DuplicatePlugin(err) => diag
                .with_context(format!(
                    "first activation at position {}, repeated at position {}",
                    err.first_position + 1,
                    err.second_position + 1
                ))
                .with_suggestion(format!(
                    "Remove the second activation of `{}` or give it a distinct name",
                    err.name
                )),
            InputError::EmptyName { layer, .. } => diag.with_suggestion(format!(
                "Give every `[[{}]]` entry a non-empty `name`",
                layer
            )),
            InputError::DuplicateVariant { name } => {
                diag.with_suggestion(format!("Merge the two `{}` variant tables", name))
            }
            InputError::MultipleFallbacks { .. } => {
                diag.with_suggestion("Keep `fallback = true` on exactly one variant")
            }
            InputError::UnknownVariant { known, .. } => {
                let diag = if known.is_empty() {
                    diag.with_context("the descriptor declares no variants")
                } else {
                    diag.with_context(format!("declared variants: {}", known.join(", ")))
                };
                diag.with_suggestion(suggestions::LIST_VARIANTS)
            }
        }
    }
}
