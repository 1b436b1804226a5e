use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::ConfigError;
use crate::utils::{app_data_dir, config_file_in, DEFAULT_LOG_FILTER};

const TMP_SUFFIX: &str = "tmp";

/// User preferences for the shell front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Budget used at startup instead of prompting for one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_budget: Option<f64>,
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
    #[serde(default = "Config::default_color_enabled")]
    pub color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_budget: None,
            log_filter: Self::default_log_filter(),
            color_enabled: Self::default_color_enabled(),
        }
    }
}

impl Config {
    fn default_log_filter() -> String {
        DEFAULT_LOG_FILTER.into()
    }

    fn default_color_enabled() -> bool {
        true
    }

    /// The configured starting budget, ignoring nonsensical values.
    pub fn starting_budget(&self) -> Option<f64> {
        self.default_budget
            .filter(|budget| budget.is_finite() && *budget > 0.0)
    }
}

/// Loads and saves [`Config`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    /// Nothing touches the disk until [`ConfigManager::save`].
    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: config_file_in(&base),
        }
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        let path = PathBuf::from("/data/config.json");
        assert_eq!(tmp_path(&path), PathBuf::from("/data/config.json.tmp"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str("{}").expect("parse");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn starting_budget_ignores_non_positive_values() {
        let mut config = Config::default();
        config.default_budget = Some(0.0);
        assert_eq!(config.starting_budget(), None);
        config.default_budget = Some(750.0);
        assert_eq!(config.starting_budget(), Some(750.0));
    }
}
