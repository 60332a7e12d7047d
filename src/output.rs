use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

/// Replace `path` with the pretty-printed document.
pub fn write(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, &json).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("Wrote {} ({} bytes)", path.display(), json.len());
    Ok(())
}

pub fn read(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}
