// src/config/settings.rs
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Serialize, Deserialize};
use anyhow::{Result, Context, anyhow};
use tracing::{info, warn};

use crate::analysis::VerdictStrategy;
use crate::file::{FileHandler, SettingsFileHandler};

pub const APP_DIR_NAME: &str = "counterfeit-detector";
pub const SETTINGS_FILE_NAME: &str = "settings.ron";
pub const ENV_PREFIX: &str = "DETECTOR";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub analysis: AnalysisSettings,
    pub background: BackgroundSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    pub delay_ms: u64,
    pub seed: Option<u64>,
    pub verdict_strategy: VerdictStrategy,
    pub brands: Vec<String>,
    pub logo_presence: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            delay_ms: 3000,
            seed: None,
            verdict_strategy: VerdictStrategy::Random,
            brands: ["Nike", "Adidas", "Gucci", "Rolex", "Louis Vuitton"]
                .iter()
                .map(|b| b.to_string())
                .collect(),
            logo_presence: 0.85,
        }
    }
}

impl AnalysisSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackgroundSettings {
    pub enabled: bool,
    pub initial_stars: usize,
    pub initial_stagger_ms: u64,
    pub spawn_interval_ms: u64,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_stars: 50,
            initial_stagger_ms: 100,
            spawn_interval_ms: 200,
        }
    }
}

impl Settings {
    /// Default location: `<config_dir>/counterfeit-detector/settings.ron`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Loads settings from the default location, writing a template there
    /// on first run.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if let Some(path) = &path {
            if !path.exists() {
                if let Err(e) = write_template(path) {
                    warn!("Could not write settings template to {}: {}", path.display(), e);
                }
            }
        }
        Self::load_from(path.as_deref())
    }

    /// Layers defaults, the optional RON file and `DETECTOR_*` environment
    /// variables (nested keys separated by `__`).
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Ron)
                    .required(false)
            );
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
        );

        let settings: Settings = builder
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Failed to parse settings")?;
        settings.validate()?;

        info!(
            delay_ms = settings.analysis.delay_ms,
            strategy = ?settings.analysis.verdict_strategy,
            background = settings.background.enabled,
            "settings loaded"
        );
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.analysis.delay_ms == 0 {
            return Err(anyhow!("analysis.delay_ms must be greater than zero"));
        }
        if !(0.0..=1.0).contains(&self.analysis.logo_presence) {
            return Err(anyhow!(
                "analysis.logo_presence must be between 0 and 1, got {}",
                self.analysis.logo_presence
            ));
        }
        if self.background.spawn_interval_ms == 0 {
            return Err(anyhow!("background.spawn_interval_ms must be greater than zero"));
        }
        Ok(())
    }
}

fn write_template(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    SettingsFileHandler::new().save(&Settings::default(), path)?;
    info!("Wrote default settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.analysis.delay(), Duration::from_millis(3000));
        assert_eq!(settings.background.initial_stars, 50);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(Some(&dir.path().join("absent.ron"))).unwrap();
        assert_eq!(settings.analysis, AnalysisSettings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, r#"{"analysis": {"delay_ms": 500, "seed": 9}}"#).unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.analysis.delay_ms, 500);
        assert_eq!(settings.analysis.seed, Some(9));
        assert_eq!(settings.analysis.logo_presence, 0.85);
        assert!(settings.background.enabled);
    }

    #[test]
    fn zero_delay_is_rejected() {
        let mut settings = Settings::default();
        settings.analysis.delay_ms = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn out_of_range_logo_presence_is_rejected() {
        let mut settings = Settings::default();
        settings.analysis.logo_presence = -0.1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn template_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE_NAME);
        write_template(&path).unwrap();

        let loaded = SettingsFileHandler::new().load(&path).unwrap();
        assert_eq!(loaded, Settings::default());
    }
}
