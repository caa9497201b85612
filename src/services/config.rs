use crate::domain::models::PipelineConfig;
use std::path::{Path, PathBuf};

fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/sunlight-dash/config.toml"))
}

/// Loads `explicit` if given (must exist), else the per-user file if present, else defaults.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("config file not found: {}", p.display());
            }
            p.to_path_buf()
        }
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(PipelineConfig::default()),
        },
    };
    let raw = std::fs::read_to_string(&path)?;
    let config: PipelineConfig = toml::from_str(&raw)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
