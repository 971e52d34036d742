//! `stevedore init` command

use std::path::PathBuf;

use anyhow::Result;

use super::{output_path, Session};
use crate::cli::InitArgs;
use stevedore::ops::{init_project, InitOptions};

pub fn execute(args: InitArgs, session: &Session) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from("."));
    let path = output_path(session.ctx(), &path);

    let opts = InitOptions { app_id: args.id };
    let manifest_path = init_project(&path, &opts)?;

    println!("Created {}", manifest_path.display());
    Ok(())
}
