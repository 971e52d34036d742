//! Plan resolution: precedence merge followed by compatibility validation.

pub mod errors;
pub mod merge;
pub mod plan;
pub mod validate;
pub mod warnings;

pub use errors::{CompatibilityError, IdentityField, PluginRequirement};
pub use merge::merge;
pub use plan::{BuildPlan, Layer, PluginFloor, Resolved, ResolvedToolchain, ResolvedVariant};
pub use validate::{ValidatedPlan, Validator};
pub use warnings::PlanWarning;
