pub mod live;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};

use crate::game::GameConfig;

pub use live::LiveMode;
pub use replay::{Intent, ReplayMode, Script, Summary};

/// Read a [`GameConfig`] from a JSON file; missing fields take their defaults
pub fn load_game_config(path: &Path) -> Result<GameConfig> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Rejected config {}", path.display()))?;
    Ok(config)
}
