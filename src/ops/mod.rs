//! High-level operations.
//!
//! This module contains the implementation of Stevedore commands.

pub mod init;
pub mod resolve;

pub use init::{init_project, InitOptions};
pub use resolve::{
    plan_file_name, resolve_all_variants, resolve_variant, write_plan, EmittedPlan, Rejection,
    ResolveOutcome, RunState,
};
