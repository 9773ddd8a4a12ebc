use crate::engine::fields::Baseline;
use crate::engine::form_sync::EngineSettings;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub quotation: QuotationConfig,
    #[serde(default)]
    pub print: PrintConfig,
    #[serde(default)]
    pub baseline: Baseline,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
}

fn default_debounce_ms() -> u64 { 400 }
fn default_notification_ms() -> u64 { 2500 }
fn default_fade_ms() -> u64 { 300 }

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            notification_ms: default_notification_ms(),
            fade_ms: default_fade_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct QuotationConfig {
    /// Days between the quotation date and its expiry.
    #[serde(default = "default_valid_days")]
    pub valid_days: u64,
    #[serde(default = "default_placeholder_item")]
    pub placeholder_item: String,
}

fn default_valid_days() -> u64 { 5 }

fn default_placeholder_item() -> String {
    "New Item".to_string()
}

impl Default for QuotationConfig {
    fn default() -> Self {
        Self {
            valid_days: default_valid_days(),
            placeholder_item: default_placeholder_item(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PrintConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Program handed the rendered file, e.g. `lp`. Empty means write only.
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default = "default_page_width")]
    pub page_width: usize,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_page_width() -> usize { 72 }

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            command: None,
            page_width: default_page_width(),
        }
    }
}

impl PrintConfig {
    /// Configured print command, ignoring blank values.
    pub fn command(&self) -> Option<&str> {
        self.command
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Like [`Config::load`], but a missing file just means defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .with_context(|| "Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.baseline.line_items.is_empty() {
            anyhow::bail!("baseline.line_items must contain at least one item");
        }
        if self.timing.debounce_ms == 0 {
            anyhow::bail!("timing.debounce_ms must be greater than 0");
        }
        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            debounce: Duration::from_millis(self.timing.debounce_ms),
            notification_display: Duration::from_millis(self.timing.notification_ms),
            notification_fade: Duration::from_millis(self.timing.fade_ms),
            valid_days: self.quotation.valid_days,
            placeholder_item: self.quotation.placeholder_item.clone(),
        }
    }
}
