//! `stevedore variants` command

use anyhow::Result;

use super::Session;
use crate::cli::VariantsArgs;
use stevedore::core::VariantSelection;

pub fn execute(_args: VariantsArgs, session: &Session) -> Result<()> {
    let manifest = session.load_manifest()?;
    let variants = &manifest.variants;

    if variants.is_empty() {
        println!("No variants declared");
        return Ok(());
    }

    let fallback = variants.fallback();

    for variant in variants.iter() {
        let (signing_ref, source) = VariantSelection::new(variant, fallback).signing();
        let marker = if fallback.is_some_and(|f| f.name == variant.name) {
            " [fallback]"
        } else {
            ""
        };

        println!(
            "{}{}: signing {} ({})",
            variant.name,
            marker,
            signing_ref.unwrap_or("-"),
            source
        );

        if !variant.overrides.is_empty() && session.ctx().is_verbose() {
            let overrides = toml::to_string(&variant.overrides)?;
            for line in overrides.lines() {
                println!("    {}", line);
            }
        }
    }

    Ok(())
}
