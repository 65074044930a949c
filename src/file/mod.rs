// src/file/mod.rs
use anyhow::{Result, Context};
use std::path::Path;
use std::fs;

use crate::config::Settings;

pub mod report;

pub use report::{AnalysisReport, ReportFileHandler};

// Core trait for file operations
pub trait FileHandler<T> {
    #[cfg(test)]
    fn load(&self, path: &Path) -> Result<T>;
    fn save(&self, data: &T, path: &Path) -> Result<()>;
}

pub(crate) fn pretty_ron() -> ron::ser::PrettyConfig {
    ron::ser::PrettyConfig::new()
        .new_line("\n".to_string())
        .depth_limit(4)
        .separate_tuple_members(true)
}

#[derive(Debug, Default)]
pub struct SettingsFileHandler;

impl SettingsFileHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<Settings> for SettingsFileHandler {
    #[cfg(test)]
    fn load(&self, path: &Path) -> Result<Settings> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        ron::from_str(&content).context("Failed to parse settings file")
    }

    fn save(&self, data: &Settings, path: &Path) -> Result<()> {
        let content = ron::ser::to_string_pretty(data, pretty_ron())?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
