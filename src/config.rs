//! Configuration management for the curriculum aligner

use crate::error::{AlignerError, Result};
use crate::model::ProgramMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub recommendations: RecommendationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Used when neither the command line nor the program record sets a mode.
    pub default_program_mode: ProgramMode,
    /// Name or id of the scoring weights record; unset means the default record.
    #[serde(default)]
    pub weights_profile: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub include_recommendations: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// TOML catalog replacing the built-in certification table.
    #[serde(default)]
    pub certification_catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Console => "console",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" => Ok(OutputFormat::Html),
            _ => Err(format!(
                "Invalid output format: {}. Supported: console, json, markdown, html",
                s
            )),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".curriculum-aligner")
            .join("analyses");

        Self {
            scoring: ScoringConfig {
                default_program_mode: ProgramMode::Teaching,
                weights_profile: None,
            },
            storage: StorageConfig { data_dir },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                include_recommendations: true,
                color_output: true,
            },
            recommendations: RecommendationConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                AlignerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            AlignerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("curriculum-aligner")
            .join("config.toml")
    }

    pub fn data_dir(&self) -> &Path {
        &self.storage.data_dir
    }

    /// Set one value by dotted key, e.g. `output.format`.
    ///
    /// An empty value clears optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "scoring.default_program_mode" => {
                self.scoring.default_program_mode = value.parse().map_err(invalid_value)?;
            }
            "scoring.weights_profile" => {
                self.scoring.weights_profile = non_empty(value).map(str::to_string);
            }
            "storage.data_dir" => {
                if value.trim().is_empty() {
                    return Err(invalid_value("storage.data_dir cannot be empty".to_string()));
                }
                self.storage.data_dir = PathBuf::from(value);
            }
            "output.format" => {
                self.output.format = value.parse().map_err(invalid_value)?;
            }
            "output.detailed" => self.output.detailed = parse_bool(key, value)?,
            "output.include_recommendations" => {
                self.output.include_recommendations = parse_bool(key, value)?
            }
            "output.color_output" => self.output.color_output = parse_bool(key, value)?,
            "recommendations.certification_catalog" => {
                self.recommendations.certification_catalog = non_empty(value).map(PathBuf::from);
            }
            _ => {
                return Err(AlignerError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn invalid_value(message: String) -> AlignerError {
    AlignerError::Configuration(message)
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(AlignerError::Configuration(format!(
            "Invalid boolean for {}: {}",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config, Config::default());
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_set_values() {
        let mut config = Config::default();

        config.set("output.format", "md").unwrap();
        config.set("output.color_output", "off").unwrap();
        config.set("scoring.default_program_mode", "research").unwrap();
        config.set("scoring.weights_profile", "Balanced").unwrap();
        config.set("recommendations.certification_catalog", "/tmp/certs.toml").unwrap();

        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert!(!config.output.color_output);
        assert_eq!(config.scoring.default_program_mode, ProgramMode::Research);
        assert_eq!(config.scoring.weights_profile.as_deref(), Some("Balanced"));
        assert_eq!(
            config.recommendations.certification_catalog,
            Some(PathBuf::from("/tmp/certs.toml"))
        );

        config.set("scoring.weights_profile", "").unwrap();
        assert!(config.scoring.weights_profile.is_none());
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();

        assert!(config.set("output.format", "pdf").is_err());
        assert!(config.set("output.detailed", "maybe").is_err());
        assert!(config.set("models.dir", "x").is_err());
        assert!(config.set("storage.data_dir", " ").is_err());
    }

    #[test]
    fn test_saved_config_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.set("scoring.weights_profile", "Research Heavy").unwrap();
        config.save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("format = \"console\""));
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
