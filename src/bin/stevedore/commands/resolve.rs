//! `stevedore resolve` command

use std::io::Write;

use anyhow::{Context, Result};

use super::{output_path, Rejected, Session};
use crate::cli::ResolveArgs;
use stevedore::emit::PlanEmitter;
use stevedore::ops::{plan_file_name, resolve_all_variants, resolve_variant, write_plan, ResolveOutcome};

pub fn execute(args: ResolveArgs, session: &Session) -> Result<()> {
    let manifest = session.load_manifest()?;
    let config = session.config(&manifest);
    let provider = config.signing_provider();
    let emitter = PlanEmitter::new().pretty(config.pretty() && !args.compact);

    let outcomes = if args.all {
        resolve_all_variants(&manifest, &provider, &emitter)?
    } else {
        vec![resolve_variant(&manifest, &args.variant, &provider, &emitter)?]
    };

    let mut rejections = Vec::new();
    for outcome in &outcomes {
        match outcome {
            ResolveOutcome::Emitted(emitted) => {
                session.report_warnings(&emitted.variant, &emitted.plan.warnings);

                match &args.output {
                    Some(output) => {
                        let base = output_path(session.ctx(), output);
                        let path = if args.all {
                            base.join(plan_file_name(&emitted.variant))
                        } else {
                            base
                        };
                        write_plan(&path, &emitted.serialized)?;
                        tracing::info!("Wrote {} ({})", path.display(), emitted.serialized.hash());
                    }
                    None => {
                        let mut stdout = std::io::stdout().lock();
                        stdout
                            .write_all(emitted.serialized.as_bytes())
                            .context("failed to write plan to stdout")?;
                    }
                }
            }
            ResolveOutcome::Rejected(rejection) => {
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
