//! `stevedore plugins` command

use anyhow::Result;

use super::Session;
use crate::cli::PluginsArgs;

pub fn execute(_args: PluginsArgs, session: &Session) -> Result<()> {
    let manifest = session.load_manifest()?;
    let plugins = &manifest.plugins;

    if plugins.is_empty() {
        println!("No plugins activated");
        return Ok(());
    }

    let floor = plugins.floor().map(|p| p.name.as_str());

    for (i, plugin) in plugins.iter().enumerate() {
        let mut notes = Vec::new();
        if plugin.ordered {
            notes.push("ordered".to_string());
        }
        if let Some(ref req) = plugin.native_toolchain {
            notes.push(format!("native {}", req));
        }
        if floor == Some(plugin.name.as_str()) {
            notes.push("sets floor".to_string());
        }

        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!(" ({})", notes.join(", "))
        };

        println!(
            "{:>3}. {} >= {}{}",
            i + 1,
            plugin.name,
            plugin.required_min_toolchain,
            notes
        );
    }

    Ok(())
}
