//! Configuration settings for the simulation engine

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    /// Seed every new board with an independent 50/50 draw per cell.
    pub random_fill: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seconds between automatic generation steps. Values at or below
    /// zero clamp to the controller's minimum tick.
    pub step_delay_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig {
                width: 32,
                height: 32,
                random_fill: true,
            },
            simulation: SimulationConfig {
                step_delay_secs: 0.25,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file.
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<()> {
        if self.board.width == 0 || self.board.height == 0 {
            anyhow::bail!(
                "board dimensions must be positive, got {}x{}",
                self.board.width,
                self.board.height
            );
        }

        if !self.simulation.step_delay_secs.is_finite() {
            anyhow::bail!("step delay must be a finite number of seconds");
        }

        Ok(())
    }

    /// Merge settings with command line overrides.
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.board.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.board.height = height;
        }
        if let Some(random_fill) = cli_overrides.random_fill {
            self.board.random_fill = random_fill;
        }
        if let Some(delay) = cli_overrides.step_delay_secs {
            self.simulation.step_delay_secs = delay;
        }
    }
}

/// Command line overrides for settings.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub random_fill: Option<bool>,
    pub step_delay_secs: Option<f32>,
}
