//! Configuration loader - YAML catalog manifest + .env render settings

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::IdentityDef;

/// User-supplied catalog manifest (extra identities on top of the built-ins)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub identities: Vec<IdentityDef>,
}

impl CatalogFile {
    /// Load a catalog manifest from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let manifest: CatalogFile = serde_yaml::from_str(&content)?;
        Ok(manifest)
    }
}

/// Render-pipeline settings loaded from .env
#[derive(Debug, Clone)]
pub struct Settings {
    pub pdflatex_bin: String,
    pub convert_bin: String,
    pub render_timeout_secs: u64,
    pub density: u32,
}

impl Settings {
    /// Load settings from .env, with working defaults for every field
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        Settings {
            pdflatex_bin: std::env::var("PDFLATEX_BIN").unwrap_or_else(|_| "pdflatex".to_string()),
            convert_bin: std::env::var("CONVERT_BIN").unwrap_or_else(|_| "convert".to_string()),
            render_timeout_secs: std::env::var("RENDER_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            density: std::env::var("RENDER_DENSITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::io::Write;

    #[test]
    fn test_load_catalog_manifest() {
        let yaml = r#"
identities:
  - key: derangement
    name: Derangement Limit
    latex: '\lim_{n \to \infty} \frac{!n}{n!} = \frac{1}{e}'
    left: '\lim_{n \to \infty} \frac{!n}{n!}'
    right: '\frac{1}{e}'
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let manifest = CatalogFile::load(file.path()).unwrap();
        assert_eq!(manifest.identities.len(), 1);

        let catalog = Catalog::with_extras(manifest.identities);
        let extra = catalog.get("derangement").unwrap();
        assert_eq!(extra.name, "Derangement Limit");
        assert_eq!(extra.right, r"\frac{1}{e}");
    }

    #[test]
    fn test_load_missing_file_is_err() {
        assert!(CatalogFile::load("/definitely/not/a/real/path.yaml").is_err());
    }
}
