//! `stevedore check` command
//!
//! Runs resolution without writing plans and prints one status line per
//! variant.

use anyhow::Result;

use super::{Rejected, Session};
use crate::cli::CheckArgs;
use stevedore::emit::PlanEmitter;
use stevedore::ops::{resolve_all_variants, resolve_variant, ResolveOutcome};
use stevedore::util::hash;

pub fn execute(args: CheckArgs, session: &Session) -> Result<()> {
    let manifest = session.load_manifest()?;
    let provider = session.config(&manifest).signing_provider();
    let emitter = PlanEmitter::new();

    let outcomes = match args.variant {
        Some(ref variant) => vec![resolve_variant(&manifest, variant, &provider, &emitter)?],
        None => resolve_all_variants(&manifest, &provider, &emitter)?,
    };

    let mut rejections = Vec::new();
    for outcome in &outcomes {
        match outcome {
            ResolveOutcome::Emitted(emitted) => {
                println!(
                    "{:<12} ok ({}, {} warning{})",
                    emitted.variant,
                    hash::short(emitted.serialized.hash()),
                    emitted.plan.warnings.len(),
                    if emitted.plan.warnings.len() == 1 { "" } else { "s" }
                );
                session.report_warnings(&emitted.variant, &emitted.plan.warnings);
            }
            ResolveOutcome::Rejected(rejection) => {
                println!("{:<12} rejected", rejection.variant);
                session.report_rejection(rejection);
                rejections.push(rejection);
            }
        }
    }

    if rejections.is_empty() {
        Ok(())
    } else {
        Err(Rejected::from_rejections(rejections).into())
    }
}
