//! Application identity and version.

use serde::{Deserialize, Serialize};

/// Divergence between the application's namespace identity and the identity
/// registered with an external service.
///
/// `effective_id` is what is actually published. The two are allowed to
/// differ so that an application can keep publishing under a legacy id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityOverride {
    /// Namespace identity declared by the application
    #[serde(rename = "canonical")]
    pub canonical_id: String,

    /// Identity published and registered with the external service
    #[serde(rename = "effective")]
    pub effective_id: String,
}

impl IdentityOverride {
    /// Create an identity that publishes under a different id.
    pub fn new(canonical_id: impl Into<String>, effective_id: impl Into<String>) -> Self {
        IdentityOverride {
            canonical_id: canonical_id.into(),
            effective_id: effective_id.into(),
        }
    }

    /// Create an identity that publishes under its canonical id.
    pub fn canonical(id: impl Into<String>) -> Self {
        let id = id.into();
        IdentityOverride {
            canonical_id: id.clone(),
            effective_id: id,
        }
    }

    /// Check if the published id differs from the canonical one.
    pub fn is_overridden(&self) -> bool {
        self.canonical_id != self.effective_id
    }
}

/// Application version passed through to the build executor unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppVersion {
    /// Monotonic integer version
    pub code: u32,

    /// User-visible version name
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_override() {
        let identity = IdentityOverride::new("com.example.app", "com.example.legacyapp");
        assert!(identity.is_overridden());

        let identity = IdentityOverride::canonical("com.example.app");
        assert!(!identity.is_overridden());
        assert_eq!(identity.effective_id, "com.example.app");
    }
}
