//! Implementation of `stevedore init`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::manifest::{generate_manifest, MANIFEST_NAME};

/// Options for initializing a descriptor.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Canonical application id; derived from the directory name if absent
    pub app_id: Option<String>,
}

/// Write a starter `Stevedore.toml` into `path`.
pub fn init_project(path: &Path, opts: &InitOptions) -> Result<PathBuf> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }

    let manifest_path = path.join(MANIFEST_NAME);
    if manifest_path.exists() {
        bail!("`{}` already exists in `{}`", MANIFEST_NAME, path.display());
    }

    let app_id = match &opts.app_id {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        Some(_) => bail!("application id must not be empty"),
        None => default_app_id(path),
    };

    fs::write(&manifest_path, generate_manifest(&app_id))
        .with_context(|| format!("failed to write {}", manifest_path.display()))?;

    tracing::info!("Created {} for `{}`", manifest_path.display(), app_id);
    Ok(manifest_path)
}

/// `com.example.<dir>` with the directory name reduced to `[a-z0-9_]`.
fn default_app_id(path: &Path) -> String {
    let dir = path
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_default();

    let mut segment: String = dir
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' => c,
            'A'..='Z' => c.to_ascii_lowercase(),
            _ => '_',
        })
        .collect();

    if segment.is_empty() || segment.starts_with(|c: char| c.is_ascii_digit()) {
        segment.insert_str(0, "app");
    }

    format!("com.example.{}", segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::Manifest;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_manifest() {
        let tmp = TempDir::new().unwrap();
        let opts = InitOptions {
            app_id: Some("com.example.app".to_string()),
        };

        let path = init_project(tmp.path(), &opts).unwrap();
        let manifest = Manifest::load(&path).unwrap();

        assert_eq!(manifest.identity.canonical_id, "com.example.app");
        assert!(manifest.toolchain.is_well_ordered());
        assert_eq!(manifest.variants.fallback().map(|v| v.name.as_str()), Some("debug"));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(MANIFEST_NAME), "keep me").unwrap();

        let opts = InitOptions { app_id: None };
        assert!(init_project(tmp.path(), &opts).is_err());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(MANIFEST_NAME)).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn test_default_app_id_from_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("My-App");
        std::fs::create_dir(&dir).unwrap();

        assert_eq!(default_app_id(&dir), "com.example.my_app");

        let dir = tmp.path().join("2048");
        std::fs::create_dir(&dir).unwrap();
        assert_eq!(default_app_id(&dir), "com.example.app2048");
    }

    #[test]
    fn test_empty_app_id_rejected() {
        let tmp = TempDir::new().unwrap();
        let opts = InitOptions {
            app_id: Some("  ".to_string()),
        };
        assert!(init_project(tmp.path(), &opts).is_err());
    }
}
