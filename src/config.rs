//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/setup-guide/config.toml` (XDG) or platform config dir
//! 2. Project config: `.setup-guide.toml`
//! 3. Environment variables: `SETUP_GUIDE_*`
//!
//! # Intended Usage
//!
//! **Project config** (`.setup-guide.toml` in the working directory):
//! ```toml
//! [rules]
//! dir = "./rules"
//!
//! [output]
//! path = "docs/setup-guide.md"
//! ```
//!
//! Every key has a default, so running without any config file uses the
//! builtin rule set and writes `setup-guide.md` in the working directory.

use std::ops::Deref;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::sources::{BuiltinSource, DirectorySource, RuleSource};

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".setup-guide.toml";

/// Default output file name.
pub const DEFAULT_OUTPUT_PATH: &str = "setup-guide.md";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where rule definitions come from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesConfig {
    /// Directory of `.yaml`/`.yml`/`.json` rule files.
    /// If not specified, the builtin rule set is used.
    pub dir: Option<PathBuf>,
}

/// Where the generated guide goes.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Output file, overwritten on success.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl RulesConfig {
    /// Build the rule source this configuration points at.
    pub fn source(&self) -> Box<dyn RuleSource> {
        match &self.dir {
            Some(dir) => Box::new(DirectorySource::new(dir.clone())),
            None => Box::new(BuiltinSource),
        }
    }
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// The layered figment, exposed so callers can add providers on top.
    pub fn figment() -> Figment {
        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(Self::user_config_path()))
            // Layer 2: Project config
            .merge(Toml::file(PROJECT_CONFIG_FILE))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("SETUP_GUIDE_").split("_"))
    }

    /// User config path: ~/.config/setup-guide/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("setup-guide").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("setup-guide").join("config.toml"))
            .unwrap_or_default()
    }
}
