//! Price a spec file directly, without the database.

use anyhow::{Context, Result};
use partprice_core::{pricing, ComponentType};
use serde_json::Value;
use std::path::Path;

use crate::config::Config;

pub fn estimate_file(component_type: &str, path: &Path) -> Result<f64> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read spec file: {}", path.display()))?;
    let record: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse spec file: {}", path.display()))?;
    Ok(pricing::price(component_type, &record))
}

/// CLI entry point for `partprice estimate`.
pub fn run_estimate(config: &Config, component_type: &str, path: &Path) -> Result<()> {
    let price = estimate_file(component_type, path)?;

    let kind = ComponentType::parse(component_type);
    if !kind.is_known() {
        eprintln!(
            "Warning: unrecognized component type '{}', using the default price",
            component_type
        );
    }

    println!("{} {}: {:.2} {}", kind, path.display(), price, config.server.currency);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_estimate_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ssd.json");
        std::fs::write(&path, r#"{"capacity": 1000, "nvme": true}"#).unwrap();
        assert_eq!(estimate_file("Storage", &path).unwrap(), 250.0);
    }

    #[test]
    fn test_estimate_invalid_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        std::fs::write(&path, "nope").unwrap();
        let err = estimate_file("CPU", &path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
