//! Command line and YAML scene configuration

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use particle_simulation::{FlockingParams, GravityParams, NetworkParams, OrbitalParams, PairingParams};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "emergence", version, about = "Interactive particle visualizations of emergent behavior")]
pub struct Cli {
    /// YAML scene file, e.g. config/talk.yaml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scene shown first; overrides the file
    #[arg(long, value_enum)]
    pub scene: Option<SceneKind>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Initial window width in logical pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height in logical pixels
    #[arg(long)]
    pub height: Option<u32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    #[default]
    Flocking,
    Pairing,
    Gravity,
    Orbital,
    Network,
}

impl SceneKind {
    pub const ALL: [SceneKind; 5] = [
        SceneKind::Flocking,
        SceneKind::Pairing,
        SceneKind::Gravity,
        SceneKind::Orbital,
        SceneKind::Network,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SceneKind::Flocking => "Flocking",
            SceneKind::Pairing => "Cooper pairs",
            SceneKind::Gravity => "Gravity",
            SceneKind::Orbital => "Orbital cloud",
            SceneKind::Network => "Network",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

/// Everything the host reads at startup
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scene: SceneKind,
    pub seed: Option<u64>,
    pub window: WindowConfig,
    pub flocking: FlockingParams,
    pub pairing: PairingParams,
    pub gravity: GravityParams,
    pub orbital: OrbitalParams,
    pub network: NetworkParams,
}

impl Config {
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).context("Invalid scene configuration")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&source).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// File values (or defaults) with command line overrides applied
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => {
                let config = Self::from_file(path)?;
                log::info!("✓ Loaded configuration from {}", path.display());
                config
            }
            None => {
                log::info!("Using default configuration");
                Self::default()
            }
        };
        config.apply_overrides(cli);
        Ok(config)
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(scene) = cli.scene {
            self.scene = scene;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(width) = cli.width {
            self.window.width = width;
        }
        if let Some(height) = cli.height {
            self.window.height = height;
        }
    }
}
