//! Signing identity lookup.
//!
//! The resolver never manages keys. It only asks an injected
//! [`SigningIdentityProvider`] whether a name refers to a known identity.
//! Providers may block (a remote provider is wrapped by the caller with its
//! own timeout) and must be shareable across concurrent runs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the implicit debug identity.
pub const DEBUG_IDENTITY: &str = "debug";

/// Whether an identity is meant for development or distribution builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningKind {
    Debug,
    #[default]
    Release,
}

/// A signing identity known to the host environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningIdentity {
    pub name: String,
    pub kind: SigningKind,
    pub keystore: Option<PathBuf>,
    pub alias: Option<String>,
}

impl SigningIdentity {
    /// Create a release identity with no keystore details.
    pub fn release(name: impl Into<String>) -> Self {
        SigningIdentity {
            name: name.into(),
            kind: SigningKind::Release,
            keystore: None,
            alias: None,
        }
    }

    /// Create a debug identity with no keystore details.
    pub fn debug(name: impl Into<String>) -> Self {
        SigningIdentity {
            kind: SigningKind::Debug,
            ..SigningIdentity::release(name)
        }
    }

    pub fn is_debug(&self) -> bool {
        self.kind == SigningKind::Debug
    }
}

/// The requested identity does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("signing identity `{name}` not found")]
pub struct NotFound {
    pub name: String,
}

/// Capability for resolving a signing reference to an identity.
pub trait SigningIdentityProvider: Send + Sync {
    /// Look up an identity by name.
    fn lookup(&self, name: &str) -> Result<SigningIdentity, NotFound>;
}

impl<F> SigningIdentityProvider for F
where
    F: Fn(&str) -> Result<SigningIdentity, NotFound> + Send + Sync,
{
    fn lookup(&self, name: &str) -> Result<SigningIdentity, NotFound> {
        self(name)
    }
}

/// In-memory provider backed by a fixed set of identities.
#[derive(Debug, Clone, Default)]
pub struct StaticSigningProvider {
    identities: BTreeMap<String, SigningIdentity>,
}

impl StaticSigningProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        StaticSigningProvider::default()
    }

    /// Add an identity, replacing any with the same name.
    pub fn with_identity(mut self, identity: SigningIdentity) -> Self {
        self.insert(identity);
        self
    }

    /// Add an identity, replacing any with the same name.
    pub fn insert(&mut self, identity: SigningIdentity) {
        self.identities.insert(identity.name.clone(), identity);
    }

    /// Known identity names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.identities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

impl SigningIdentityProvider for StaticSigningProvider {
    fn lookup(&self, name: &str) -> Result<SigningIdentity, NotFound> {
        self.identities.get(name).cloned().ok_or_else(|| NotFound {
            name: name.to_string(),
        })
    }
}
