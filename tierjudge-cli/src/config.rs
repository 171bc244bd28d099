/// Config file loading and creation for the tierjudge CLI.
///
/// Config lives at ~/.config/tierjudge/config.toml.
/// All fields are optional; CLI flags override config values.
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct TierjudgeConfig {
    /// Print results as JSON by default.
    pub json: Option<bool>,
    /// Inputs that pick the first (left) item.
    pub first_keys: Option<Vec<String>>,
    /// Inputs that pick the second (right) item.
    pub second_keys: Option<Vec<String>>,
    /// Width of the progress bar in characters.
    pub progress_width: Option<usize>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# tierjudge configuration
# All values here can be overridden by CLI flags.

# Print the final tier list as JSON instead of a table
# json = false

# Inputs that choose the first (left) item of a comparison.
# Arrow keys arrive as escape sequences and are recognized by default.
# first_keys = [\"1\", \"left\"]

# Inputs that choose the second (right) item of a comparison.
# second_keys = [\"2\", \"right\"]

# Width of the progress bar shown with each comparison
# progress_width = 30
";

/// Returns the default config path: ~/.config/tierjudge/config.toml
pub fn config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("tierjudge").join("config.toml"))
}

/// Load config from a file path. Returns default (all None) if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<TierjudgeConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TierjudgeConfig::default()),
        Err(e) => Err(e).with_context(|| format!("Failed to read config at {}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> Result<PathBuf> {
    let path = config_path()?;
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config to {}", path.display()))
}
