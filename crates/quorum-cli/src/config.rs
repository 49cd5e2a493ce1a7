//! Locating and loading `.quorum/config.toml`.

use std::path::Path;

use anyhow::Context;
use quorum_core::AnalysisConfig;
use quorum_core::config::CONFIG_PATH;
use tracing::debug;

/// Load the analysis config.
///
/// An explicit path must exist. Without one, `<project_root>/.quorum/config.toml`
/// is used when present; otherwise every field takes its default.
pub fn load_config(explicit: Option<&Path>, project_root: &Path) -> anyhow::Result<AnalysisConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = project_root.join(CONFIG_PATH);
            if !path.exists() {
                debug!("no config file, using defaults");
                return Ok(AnalysisConfig::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let config = AnalysisConfig::from_toml_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}
