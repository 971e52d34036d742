//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Stevedore - resolve layered mobile build descriptors into build plans
#[derive(Parser)]
#[command(name = "stevedore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to Stevedore.toml (default: search from the current directory)
    #[arg(long, global = true, env = "STEVEDORE_MANIFEST", value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a variant into a build plan
    Resolve(ResolveArgs),

    /// Validate variants without writing plans
    Check(CheckArgs),

    /// List plugin activations in activation order
    Plugins(PluginsArgs),

    /// List declared variants and their signing
    Variants(VariantsArgs),

    /// Create a Stevedore.toml in a directory
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Variant to resolve
    #[arg(long, default_value = "release", conflicts_with = "all")]
    pub variant: String,

    /// Resolve every declared variant (requires --output)
    #[arg(long, requires = "output")]
    pub all: bool,

    /// Write the plan to a file (a directory with --all)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Emit compact JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Variant to check (default: every declared variant)
    #[arg(long)]
    pub variant: Option<String>,
}

#[derive(Args)]
pub struct PluginsArgs {}

#[derive(Args)]
pub struct VariantsArgs {}

#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,

    /// Canonical application id (defaults to com.example.<directory>)
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_all_requires_output() {
        assert!(Cli::try_parse_from(["stevedore", "resolve", "--all"]).is_err());
        assert!(Cli::try_parse_from(["stevedore", "resolve", "--all", "-o", "plans"]).is_ok());
    }

    #[test]
    fn test_variant_defaults_to_release() {
        let cli = Cli::try_parse_from(["stevedore", "resolve"]).unwrap();
        match cli.command {
            Commands::Resolve(args) => assert_eq!(args.variant, "release"),
            _ => panic!("expected resolve"),
        }
    }
}
