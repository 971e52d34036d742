//! Plugin registry - ordered, duplicate-free set of plugin activations.
//!
//! Registration happens during a setup phase only. `freeze()` consumes the
//! registry and hands back an immutable [`FrozenRegistry`]; the merger only
//! accepts the frozen form, so registration can never race with merging.

use std::collections::HashMap;
use std::sync::Arc;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::plugin::PluginActivation;

/// A plugin name was registered twice.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
#[error("plugin `{name}` is already registered")]
#[diagnostic(
    code(stevedore::registry::duplicate_plugin),
    help("Plugin names must be unique within a descriptor")
)]
pub struct DuplicateNameError {
    /// The repeated plugin name
    pub name: String,

    /// Zero-based position of the first activation
    pub first_position: usize,

    /// Zero-based position of the rejected activation
    pub second_position: usize,
}

/// Registry of plugin activations in activation order.
///
/// Insertion order is the activation order exposed downstream. Duplicates
/// are always an error, never merged.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: Vec<PluginActivation>,
    positions: HashMap<String, usize>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        PluginRegistry::default()
    }

    /// Register a plugin activation.
    pub fn register(&mut self, activation: PluginActivation) -> Result<(), DuplicateNameError> {
        let position = self.plugins.len();

        if let Some(&first) = self.positions.get(&activation.name) {
            return Err(DuplicateNameError {
                name: activation.name,
                first_position: first,
                second_position: position,
            });
        }

        tracing::debug!(
            "registered plugin `{}` at position {} (requires {})",
            activation.name,
            position,
            activation.required_min_toolchain
        );

        self.positions.insert(activation.name.clone(), position);
        self.plugins.push(activation);
        Ok(())
    }

    /// Get a plugin by name.
    pub fn get(&self, name: &str) -> Option<&PluginActivation> {
        self.positions.get(name).map(|&i| &self.plugins[i])
    }

    /// Check if a plugin is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// End the setup phase.
    pub fn freeze(self) -> FrozenRegistry {
        FrozenRegistry {
            plugins: self.plugins.into(),
        }
    }
}

/// Immutable plugin activations, shareable across concurrent runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrozenRegistry {
    plugins: Arc<[PluginActivation]>,
}

impl Default for FrozenRegistry {
    fn default() -> Self {
        PluginRegistry::new().freeze()
    }
}

impl FrozenRegistry {
    /// Register every activation in order and freeze the result.
    pub fn from_activations(
        activations: impl IntoIterator<Item = PluginActivation>,
    ) -> Result<Self, DuplicateNameError> {
        let mut registry = PluginRegistry::new();
        for activation in activations {
            registry.register(activation)?;
        }
        Ok(registry.freeze())
    }

    /// Activations in activation order.
    pub fn iter(&self) -> impl Iterator<Item = &PluginActivation> + '_ {
        self.plugins.iter()
    }

    /// Activation names in activation order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.plugins.iter().map(|p| p.name.as_str())
    }

    /// Get a plugin by name.
    pub fn get(&self, name: &str) -> Option<&PluginActivation> {
        self.plugins.iter().find(|p| p.name == name)
    }

    /// The activation with the highest `required_min_toolchain`.
    ///
    /// Ties go to the earliest registered plugin.
    pub fn floor(&self) -> Option<&PluginActivation> {
        self.plugins.iter().fold(None, |best, plugin| match best {
            Some(b) if b.required_min_toolchain >= plugin.required_min_toolchain => Some(b),
            _ => Some(plugin),
        })
    }

    pub fn as_slice(&self) -> &[PluginActivation] {
        &self.plugins
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
