//! Plugin activations - the integrations enabled for a build.

use semver::VersionReq;
use serde::{Deserialize, Serialize};

/// Declaration that a named integration is enabled for this build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginActivation {
    /// Plugin name, unique within a plan
    pub name: String,

    /// Lowest toolchain API level the plugin works with
    #[serde(rename = "required-min-toolchain", default)]
    pub required_min_toolchain: u32,

    /// Whether this plugin's position in the activation order matters
    #[serde(default)]
    pub ordered: bool,

    /// Native toolchain versions the plugin accepts
    #[serde(
        rename = "native-toolchain",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub native_toolchain: Option<VersionReq>,
}

impl PluginActivation {
    /// Create an unordered activation.
    pub fn new(name: impl Into<String>, required_min_toolchain: u32) -> Self {
        PluginActivation {
            name: name.into(),
            required_min_toolchain,
            ordered: false,
            native_toolchain: None,
        }
    }

    /// Mark the activation as order-sensitive.
    pub fn ordered(mut self) -> Self {
        self.ordered = true;
        self
    }

    /// Require a native toolchain version.
    pub fn with_native_toolchain(mut self, req: VersionReq) -> Self {
        self.native_toolchain = Some(req);
        self
    }
}
