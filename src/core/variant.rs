//! Build variants and signing inheritance.

use serde::{Deserialize, Serialize};

use crate::core::error::InputError;
use crate::core::toolchain::ToolchainOverrides;

/// Variant used as the signing fallback when none is flagged explicitly.
pub const DEFAULT_FALLBACK_VARIANT: &str = "debug";

/// A named build configuration, e.g. `release` or `debug`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Variant name
    pub name: String,

    /// Name of the signing identity to sign with
    #[serde(rename = "signing", default, skip_serializing_if = "Option::is_none")]
    pub signing_ref: Option<String>,

    /// Whether other variants inherit this variant's signing reference
    #[serde(default, skip_serializing_if = "is_false")]
    pub fallback: bool,

    /// Explicit toolchain values for this variant
    #[serde(flatten)]
    pub overrides: ToolchainOverrides,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl VariantConfig {
    /// Create a variant with no signing reference and no overrides.
    pub fn new(name: impl Into<String>) -> Self {
        VariantConfig {
            name: name.into(),
            signing_ref: None,
            fallback: false,
            overrides: ToolchainOverrides::default(),
        }
    }

    /// Set the signing reference.
    pub fn with_signing(mut self, signing_ref: impl Into<String>) -> Self {
        self.signing_ref = Some(signing_ref.into());
        self
    }

    /// Mark this variant as the signing fallback.
    pub fn as_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    /// Set explicit toolchain overrides.
    pub fn with_overrides(mut self, overrides: ToolchainOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Where a variant's signing reference came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SigningSource {
    /// Declared on the variant itself
    Explicit,
    /// Inherited from the fallback variant
    Inherited { from: String },
    /// Neither the variant nor the fallback declares one
    Unset,
}

impl std::fmt::Display for SigningSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SigningSource::Explicit => write!(f, "explicit"),
            SigningSource::Inherited { from } => write!(f, "inherited from `{}`", from),
            SigningSource::Unset => write!(f, "unset"),
        }
    }
}

/// The declared variants, in declaration order, with one designated fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantTable {
    variants: Vec<VariantConfig>,
    fallback: Option<usize>,
}

impl VariantTable {
    /// Build a table, rejecting empty or duplicate names and competing
    /// fallbacks.
    ///
    /// The fallback is the variant flagged `fallback = true`, or the variant
    /// named `debug` when none is flagged.
    pub fn new(variants: Vec<VariantConfig>) -> Result<Self, InputError> {
        let mut fallback: Option<usize> = None;

        for (i, variant) in variants.iter().enumerate() {
            if variant.name.is_empty() {
                return Err(InputError::EmptyName {
                    layer: "variants",
                    index: i + 1,
                });
            }

            if variants[..i].iter().any(|v| v.name == variant.name) {
                return Err(InputError::DuplicateVariant {
                    name: variant.name.clone(),
                });
            }

            if variant.fallback {
                if let Some(first) = fallback {
                    return Err(InputError::MultipleFallbacks {
                        first: variants[first].name.clone(),
                        second: variant.name.clone(),
                    });
                }
                fallback = Some(i);
            }
        }

        let fallback = fallback.or_else(|| {
            variants
                .iter()
                .position(|v| v.name == DEFAULT_FALLBACK_VARIANT)
        });

        Ok(VariantTable { variants, fallback })
    }

    /// Select a variant by name, pairing it with the fallback.
    pub fn select(&self, name: &str) -> Result<VariantSelection<'_>, InputError> {
        let variant = self
            .variants
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| InputError::UnknownVariant {
                name: name.to_string(),
                known: self.names().map(str::to_string).collect(),
            })?;

        Ok(VariantSelection {
            variant,
            fallback: self.fallback(),
        })
    }

    /// Get the fallback variant.
    pub fn fallback(&self) -> Option<&VariantConfig> {
        self.fallback.map(|i| &self.variants[i])
    }

    /// Variant names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.variants.iter().map(|v| v.name.as_str())
    }

    /// All variants in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &VariantConfig> + '_ {
        self.variants.iter()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// A selected variant together with the fallback it may inherit from.
#[derive(Debug, Clone, Copy)]
pub struct VariantSelection<'a> {
    pub variant: &'a VariantConfig,
    pub fallback: Option<&'a VariantConfig>,
}

impl<'a> VariantSelection<'a> {
    /// Pair a variant with an explicit fallback.
    pub fn new(variant: &'a VariantConfig, fallback: Option<&'a VariantConfig>) -> Self {
        VariantSelection { variant, fallback }
    }

    /// Resolve the signing reference, applying fallback inheritance.
    pub fn signing(&self) -> (Option<&'a str>, SigningSource) {
        let variant: &'a VariantConfig = self.variant;
        if let Some(signing_ref) = variant.signing_ref.as_deref() {
            return (Some(signing_ref), SigningSource::Explicit);
        }

        match self.fallback {
            Some(fallback) if fallback.name != variant.name => {
                match fallback.signing_ref.as_deref() {
                    Some(signing_ref) => (
                        Some(signing_ref),
                        SigningSource::Inherited {
                            from: fallback.name.clone(),
                        },
                    ),
                    None => (None, SigningSource::Unset),
                }
            }
            _ => (None, SigningSource::Unset),
        }
    }
}
