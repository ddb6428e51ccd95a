//! Application configuration
//!
//! Priority (highest to lowest):
//! 1. Environment variables prefixed `POCKETCALC_` (`__` separates nesting,
//!    e.g. `POCKETCALC_PLOT__STEPS=400`)
//! 2. An explicit config file, or else `config/pocketcalc.{toml,yaml,json}`
//! 3. Default values

use crate::logging::LogConfig;
use crate::{Error, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use pocketcalc_eval::AngleMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const ENV_PREFIX: &str = "POCKETCALC_";
/// Default config file location, without extension
pub const DEFAULT_CONFIG_STEM: &str = "config/pocketcalc";
/// Most decimals a converter result may show
pub const MAX_DECIMALS: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Angle convention at start-up
    pub angle_mode: AngleMode,
    pub plot: PlotConfig,
    pub converter: ConverterConfig,
    pub calculator: CalculatorConfig,
    pub logging: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Sub-intervals per plot
    pub steps: usize,
    /// Grid divisions per axis
    pub tick_count: usize,
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            steps: 200,
            tick_count: 5,
            width: 335.0,
            height: 300.0,
            margin: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub decimals: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Characters of a result shown on the display
    pub display_width: usize,
    /// Longest accepted entry
    pub input_limit: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            display_width: 12,
            input_limit: 24,
        }
    }
}

impl AppConfig {
    /// Reject settings the engines cannot run with.
    pub fn validate(&self) -> Result<()> {
        let plot = &self.plot;
        if plot.steps == 0 {
            return Err(Error::config("plot.steps must be at least 1"));
        }
        if plot.tick_count == 0 {
            return Err(Error::config("plot.tick_count must be at least 1"));
        }
        let finite = [plot.width, plot.height, plot.margin]
            .iter()
            .all(|v| v.is_finite());
        if !finite
            || plot.margin < 0.0
            || plot.width <= 2.0 * plot.margin
            || plot.height <= 2.0 * plot.margin
        {
            return Err(Error::config(format!(
                "plot surface {}x{} leaves no room inside margin {}",
                plot.width, plot.height, plot.margin
            )));
        }
        if self.converter.decimals > MAX_DECIMALS {
            return Err(Error::config(format!(
                "converter.decimals must be at most {}",
                MAX_DECIMALS
            )));
        }
        if self.calculator.display_width == 0 || self.calculator.input_limit == 0 {
            return Err(Error::config(
                "calculator.display_width and calculator.input_limit must be at least 1",
            ));
        }
        Ok(())
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    if !path.is_file() {
        return Err(Error::config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::config("Config file must have an extension"))?;

    match extension {
        "toml" => Ok(figment.merge(Toml::file(path))),
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        "json" => Ok(figment.merge(Json::file(path))),
        _ => Err(Error::config(format!(
            "Unsupported config file format: {}",
            extension
        ))),
    }
}

fn extract(figment: Figment) -> Result<AppConfig> {
    let config: AppConfig = figment
        .extract()
        .map_err(|e| Error::config(format!("Failed to load configuration: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from defaults, the default file location and the environment.
pub fn load_config() -> Result<AppConfig> {
    load_config_with(None)
}

/// Like [`load_config`], reading `path` instead of the default file location.
pub fn load_config_with(path: Option<&Path>) -> Result<AppConfig> {
    let defaults = Figment::from(Serialized::defaults(AppConfig::default()));
    let figment = match path {
        Some(path) => merge_file(defaults, path)?,
        None => defaults
            .merge(Toml::file(format!("{}.toml", DEFAULT_CONFIG_STEM)))
            .merge(Yaml::file(format!("{}.yaml", DEFAULT_CONFIG_STEM)))
            .merge(Json::file(format!("{}.json", DEFAULT_CONFIG_STEM))),
    };
    let figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config = extract(figment)?;
    debug!(file = ?path, "configuration loaded");
    Ok(config)
}

/// Load configuration from a specific file over the defaults, ignoring the environment.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let defaults = Figment::from(Serialized::defaults(AppConfig::default()));
    extract(merge_file(defaults, path.as_ref())?)
}

/// Output formats for [`render_config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

/// Serialize a configuration, e.g. to show the effective settings.
pub fn render_config(config: &AppConfig, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Toml => {
            toml::to_string_pretty(config).map_err(|e| Error::serialization(e.to_string()))
        },
        ConfigFormat::Yaml => {
            serde_yaml::to_string(config).map_err(|e| Error::serialization(e.to_string()))
        },
        ConfigFormat::Json => {
            serde_json::to_string_pretty(config).map_err(|e| Error::serialization(e.to_string()))
        },
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.angle_mode, AngleMode::Degrees);
        assert_eq!(config.plot.steps, 200);
        assert_eq!(config.plot.tick_count, 5);
        assert_eq!(config.converter.decimals, 2);
        assert_eq!(config.calculator.display_width, 12);
        assert_eq!(config.calculator.input_limit, 24);
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let file = write_config(
            ".toml",
            r#"
angle_mode = "radians"

[plot]
steps = 50
"#,
        );
        let config = load_config_from_file(file.path()).unwrap();
        assert_eq!(config.angle_mode, AngleMode::Radians);
        assert_eq!(config.plot.steps, 50);
        // untouched sections keep their defaults
        assert_eq!(config.plot.tick_count, 5);
        assert_eq!(config.converter.decimals, 2);
    }

    #[test]
    fn test_yaml_file() {
        let file = write_config(
            ".yaml",
            "converter:\n  decimals: 4\nlogging:\n  level: debug\n  format: json\n",
        );
        let config = load_config_from_file(file.path()).unwrap();
        assert_eq!(config.converter.decimals, 4);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, crate::logging::LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = write_config(".json", r#"{"plot": {"steps": 0}}"#);
        assert!(matches!(
            load_config_from_file(file.path()),
            Err(Error::Config(_))
        ));

        let file = write_config(".toml", "[plot]\nwidth = 50.0\n");
        assert!(load_config_from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_and_unsupported_files() {
        assert!(load_config_from_file("/nonexistent/pocketcalc.toml").is_err());

        let file = write_config(".ini", "steps=1");
        let err = load_config_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = write_config(".toml", "[plot]\nsteps = 50\ntick_count = 8\n");
        std::env::set_var("POCKETCALC_PLOT__STEPS", "400");
        let config = load_config_with(Some(file.path()));
        std::env::remove_var("POCKETCALC_PLOT__STEPS");

        let config = config.unwrap();
        assert_eq!(config.plot.steps, 400);
        assert_eq!(config.plot.tick_count, 8);
    }

    #[test]
    fn test_render_round_trips() {
        let config = AppConfig::default();
        for format in [ConfigFormat::Toml, ConfigFormat::Yaml, ConfigFormat::Json] {
            let text = render_config(&config, format).unwrap();
            assert!(text.contains("steps"));
        }
    }
}
