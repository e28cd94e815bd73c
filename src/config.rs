use crate::error::{AgroError, Result};
use crate::models::{ApplicationMethod, FertilizerType, Season};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub calculator: CalculatorConfig,
    pub plant_health: Option<PlantHealthConfig>,
}

/// Initial selections for a fresh calculator form.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub default_crop: Option<String>,
    pub fertilizer_type: String,
    pub application_method: String,
    pub season: String,
}

impl CalculatorConfig {
    pub fn fertilizer_type(&self) -> FertilizerType {
        FertilizerType::from_str(&self.fertilizer_type).unwrap_or_default()
    }

    pub fn application_method(&self) -> ApplicationMethod {
        ApplicationMethod::from_str(&self.application_method).unwrap_or_default()
    }

    pub fn season(&self) -> Season {
        Season::from_str(&self.season).unwrap_or_default()
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_crop: None,
            fertilizer_type: FertilizerType::default().value().into(),
            application_method: "Broadcast Spreading".into(),
            season: "Spring".into(),
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct PlantHealthConfig {
    #[serde(default = "default_plant_health_url")]
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_true")]
    pub similar_images: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_plant_health_url() -> String {
    "https://plant.id/api/v3".into()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

impl std::fmt::Debug for PlantHealthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlantHealthConfig")
            .field("url", &self.url)
            .field("api_key", &"[REDACTED]")
            .field("similar_images", &self.similar_images)
            .field("timeout_secs", &self.timeout_secs)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(AgroError::Config(format!(
                "Config file not found at {:?}. Run `agroassist init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AgroError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Like `load`, but a missing file yields the built-in defaults.
    /// A file that exists and fails to parse is still an error.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if Self::exists(config_override.as_ref()) {
            Self::load(config_override)
        } else {
            tracing::info!("no config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        serde_yaml::from_str(&content)
            .map_err(|e| AgroError::Config(format!("Failed to parse config: {}", e)))
    }

    /// The plant-health section, if present and switched on.
    pub fn plant_health(&self) -> Option<&PlantHealthConfig> {
        self.plant_health
            .as_ref()
            .filter(|c| c.enabled && !c.api_key.is_empty())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("agroassist").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/agroassist/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgroError::Config("Cannot determine config directory".into()))?
            .join("agroassist");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up AgroAssist!");
        println!();

        println!("Calculator defaults");
        let default_crop: String = Input::new()
            .with_prompt("  Default crop (blank for none)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AgroError::Config(format!("Input error: {}", e)))?;

        let fertilizer_type: String = Input::new()
            .with_prompt("  Fertilizer type (synthetic, organic, custom)")
            .default(FertilizerType::default().value().into())
            .interact_text()
            .map_err(|e| AgroError::Config(format!("Input error: {}", e)))?;

        let application_method: String = Input::new()
            .with_prompt("  Application method")
            .default("Broadcast Spreading".into())
            .interact_text()
            .map_err(|e| AgroError::Config(format!("Input error: {}", e)))?;

        let season: String = Input::new()
            .with_prompt("  Season")
            .default("Spring".into())
            .interact_text()
            .map_err(|e| AgroError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Plant health API (leave API key blank to skip)");
        let api_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| AgroError::Config(format!("Input error: {}", e)))?;

        let plant_health = if api_key.is_empty() {
            None
        } else {
            let url: String = Input::new()
                .with_prompt("  API base URL")
                .default(default_plant_health_url())
                .interact_text()
                .map_err(|e| AgroError::Config(format!("Input error: {}", e)))?;

            Some(PlantHealthConfig {
                url,
                api_key,
                similar_images: true,
                timeout_secs: default_timeout_secs(),
                enabled: true,
            })
        };

        println!();

        let config = Config {
            calculator: CalculatorConfig {
                default_crop: Some(default_crop).filter(|c| !c.is_empty()),
                fertilizer_type,
                application_method,
                season,
            },
            plant_health,
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| AgroError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# AgroAssist Configuration\n# Generated by `agroassist init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return result;
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("AGROASSIST_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| AgroError::Config("Cannot determine data directory".into()))?
            .join("agroassist");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("agroassist.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert!(config.plant_health.is_none());
        assert_eq!(config.calculator.fertilizer_type, "synthetic");
        assert_eq!(config.calculator.fertilizer_type(), FertilizerType::Synthetic);
        assert_eq!(
            config.calculator.application_method(),
            ApplicationMethod::BroadcastSpreading
        );
        assert_eq!(config.calculator.season(), Season::Spring);
    }

    #[test]
    fn parses_full_config() {
        let yaml = r#"
calculator:
  default_crop: Maize
  fertilizer_type: organic
  application_method: Row Banding
  season: Fall
plant_health:
  api_key: secret
  timeout_secs: 10
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.calculator.default_crop.as_deref(), Some("Maize"));
        assert_eq!(config.calculator.fertilizer_type(), FertilizerType::Organic);
        assert_eq!(
            config.calculator.application_method(),
            ApplicationMethod::RowBanding
        );
        assert_eq!(config.calculator.season(), Season::Fall);

        let ph = config.plant_health().unwrap();
        assert_eq!(ph.url, "https://plant.id/api/v3");
        assert_eq!(ph.timeout_secs, 10);
        assert!(ph.similar_images);
    }

    #[test]
    fn unknown_selections_fall_back_to_defaults() {
        let yaml = r#"
calculator:
  fertilizer_type: compost tea
  application_method: injection
  season: monsoon
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.calculator.fertilizer_type(), FertilizerType::Synthetic);
        assert_eq!(
            config.calculator.application_method(),
            ApplicationMethod::BroadcastSpreading
        );
        assert_eq!(config.calculator.season(), Season::Spring);
    }

    #[test]
    fn disabled_or_keyless_plant_health_is_hidden() {
        let config = Config::from_yaml("plant_health:\n  api_key: k\n  enabled: false\n").unwrap();
        assert!(config.plant_health().is_none());

        let config = Config::from_yaml("plant_health:\n  api_key: ''\n").unwrap();
        assert!(config.plant_health().is_none());
    }

    #[test]
    fn substitutes_env_vars() {
        std::env::set_var("AGROASSIST_TEST_PLANT_KEY", "from-env");
        let config =
            Config::from_yaml("plant_health:\n  api_key: ${AGROASSIST_TEST_PLANT_KEY}\n").unwrap();
        assert_eq!(config.plant_health.unwrap().api_key, "from-env");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = Config::from_yaml("plant_health:\n  api_key: top-secret\n").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn invalid_yaml_is_config_error() {
        let err = Config::from_yaml("calculator: [unclosed").unwrap_err();
        assert!(matches!(err, AgroError::Config(_)));
    }
}
