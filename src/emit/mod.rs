//! Plan serialization for the external build executor.
//!
//! A plan is written as one JSON document:
//!
//! ```json
//! { "schema": 1, "plan": { ... }, "activation_order": [...], "warnings": [...] }
//! ```
//!
//! Emitting is pure: the same validated plan always produces the same bytes
//! and therefore the same SHA-256 digest. Nothing in a plan is keyed by a
//! hash map, so field and element order is fixed by the types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resolver::{BuildPlan, PlanWarning, ValidatedPlan};
use crate::util::hash::sha256_bytes;

/// Version of the emitted document layout.
pub const PLAN_SCHEMA_VERSION: u32 = 1;

/// Errors from emitting or reading back a plan document.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to serialize build plan")]
    Serialize(#[source] serde_json::Error),

    #[error("malformed plan document")]
    Parse(#[source] serde_json::Error),

    #[error("plan schema {found} is not supported (expected {PLAN_SCHEMA_VERSION})")]
    UnsupportedSchema { found: u32 },

    #[error("activation order {listed:?} does not match the plan's plugins {actual:?}")]
    ActivationOrderMismatch {
        listed: Vec<String>,
        actual: Vec<String>,
    },
}

/// The document written for the build executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub schema: u32,
    pub plan: BuildPlan,
    pub activation_order: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<PlanWarning>,
}

impl PlanDocument {
    pub fn new(validated: &ValidatedPlan) -> Self {
        PlanDocument {
            schema: PLAN_SCHEMA_VERSION,
            plan: validated.plan.clone(),
            activation_order: validated.plan.activation_order(),
            warnings: validated.warnings.clone(),
        }
    }
}

/// Serialized plan document and its digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedPlan {
    text: String,
    hash: String,
}

impl SerializedPlan {
    fn new(text: String) -> Self {
        let hash = sha256_bytes(text.as_bytes());
        SerializedPlan { text, hash }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// SHA-256 hex digest of the bytes.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.text.into_bytes()
    }
}

/// Serializes validated plans.
#[derive(Debug, Clone, Copy)]
pub struct PlanEmitter {
    pretty: bool,
}

impl Default for PlanEmitter {
    fn default() -> Self {
        PlanEmitter { pretty: true }
    }
}

impl PlanEmitter {
    /// Create an emitter that pretty-prints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose pretty or compact output.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Serialize a validated plan.
    pub fn emit(&self, validated: &ValidatedPlan) -> Result<SerializedPlan, EmitError> {
        let document = PlanDocument::new(validated);

        let mut text = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        }
        .map_err(EmitError::Serialize)?;
        text.push('\n');

        Ok(SerializedPlan::new(text))
    }
}

/// Serialize a validated plan with the default (pretty) emitter.
pub fn emit(validated: &ValidatedPlan) -> Result<SerializedPlan, EmitError> {
    PlanEmitter::default().emit(validated)
}

/// Read an emitted document back into a validated plan.
pub fn parse(bytes: &[u8]) -> Result<ValidatedPlan, EmitError> {
    let document: PlanDocument = serde_json::from_slice(bytes).map_err(EmitError::Parse)?;

    if document.schema != PLAN_SCHEMA_VERSION {
        return Err(EmitError::UnsupportedSchema {
            found: document.schema,
        });
    }

    let actual = document.plan.activation_order();
    if document.activation_order != actual {
        return Err(EmitError::ActivationOrderMismatch {
            listed: document.activation_order,
            actual,
        });
    }

    Ok(ValidatedPlan {
        plan: document.plan,
        warnings: document.warnings,
    })
}
