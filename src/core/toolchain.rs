//! Toolchain descriptor - the base layer of every resolution.

use serde::{Deserialize, Serialize};

/// Compiler and runtime version constraints governing a build.
///
/// Versions are platform API levels. The descriptor is well formed when
/// `min_supported_version <= target_version <= compile_target_version`;
/// that is checked on the resolved plan, not here, so that a malformed base
/// still produces a complete list of problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainDescriptor {
    /// API level the application is compiled against
    #[serde(rename = "compile-target")]
    pub compile_target_version: u32,

    /// Lowest API level the application runs on
    #[serde(rename = "min-supported")]
    pub min_supported_version: u32,

    /// API level the application is tested against
    #[serde(rename = "target")]
    pub target_version: u32,

    /// Native toolchain (NDK) version, e.g. `27.0.12077973`
    #[serde(rename = "native-toolchain", default)]
    pub native_toolchain_version: String,

    /// Source/bytecode language level, e.g. `11`
    #[serde(rename = "language-level", default)]
    pub language_level: String,
}

impl ToolchainDescriptor {
    /// Create a descriptor with the three API levels and empty strings.
    pub fn new(min_supported: u32, target: u32, compile_target: u32) -> Self {
        ToolchainDescriptor {
            compile_target_version: compile_target,
            min_supported_version: min_supported,
            target_version: target,
            native_toolchain_version: String::new(),
            language_level: String::new(),
        }
    }

    /// Set the native toolchain version.
    pub fn with_native_toolchain(mut self, version: impl Into<String>) -> Self {
        self.native_toolchain_version = version.into();
        self
    }

    /// Set the language level.
    pub fn with_language_level(mut self, level: impl Into<String>) -> Self {
        self.language_level = level.into();
        self
    }

    /// Check the `min <= target <= compile` invariant.
    pub fn is_well_ordered(&self) -> bool {
        self.min_supported_version <= self.target_version
            && self.target_version <= self.compile_target_version
    }
}

/// Explicit toolchain values declared on a variant.
///
/// Every field is optional; a present field wins over both the plugin floor
/// and the base descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainOverrides {
    #[serde(rename = "compile-target", default, skip_serializing_if = "Option::is_none")]
    pub compile_target_version: Option<u32>,

    #[serde(rename = "min-supported", default, skip_serializing_if = "Option::is_none")]
    pub min_supported_version: Option<u32>,

    #[serde(rename = "target", default, skip_serializing_if = "Option::is_none")]
    pub target_version: Option<u32>,

    #[serde(rename = "native-toolchain", default, skip_serializing_if = "Option::is_none")]
    pub native_toolchain_version: Option<String>,

    #[serde(rename = "language-level", default, skip_serializing_if = "Option::is_none")]
    pub language_level: Option<String>,
}

impl ToolchainOverrides {
    /// Check if any override is set.
    pub fn is_empty(&self) -> bool {
        self.compile_target_version.is_none()
            && self.min_supported_version.is_none()
            && self.target_version.is_none()
            && self.native_toolchain_version.is_none()
            && self.language_level.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_ordered() {
        assert!(ToolchainDescriptor::new(23, 35, 35).is_well_ordered());
        assert!(ToolchainDescriptor::new(30, 30, 30).is_well_ordered());
        assert!(!ToolchainDescriptor::new(24, 23, 35).is_well_ordered());
        assert!(!ToolchainDescriptor::new(21, 35, 34).is_well_ordered());
    }

    #[test]
    fn test_toolchain_from_toml() {
        let toolchain: ToolchainDescriptor = toml::from_str(
            r#"
compile-target = 35
min-supported = 23
target = 34
native-toolchain = "27.0.12077973"
language-level = "11"
"#,
        )
        .unwrap();

        assert_eq!(toolchain.compile_target_version, 35);
        assert_eq!(toolchain.min_supported_version, 23);
        assert_eq!(toolchain.target_version, 34);
        assert_eq!(toolchain.native_toolchain_version, "27.0.12077973");
        assert_eq!(toolchain.language_level, "11");
    }

    #[test]
    fn test_overrides_is_empty() {
        let mut overrides = ToolchainOverrides::default();
        assert!(overrides.is_empty());

        overrides.language_level = Some("17".to_string());
        assert!(!overrides.is_empty());
    }
}
