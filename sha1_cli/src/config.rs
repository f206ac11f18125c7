use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Data, Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use sha1_core::EngineConfig;
use std::fs;
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: String,
    pub uppercase: bool,
    pub color_enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            uppercase: false,
            color_enabled: true,
        }
    }
}

impl AppConfig {
    /// Reject settings the engine or the output layer cannot run with
    pub fn validate(&self) -> Result<()> {
        self.engine
            .validate()
            .context("Invalid engine configuration")?;
        crate::output::OutputFormat::from_string(&self.output.default_format)
            .context("Invalid output.default_format")?;
        Ok(())
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Get the default XDG-compliant configuration path
    fn default_config_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("sha1/config.toml");
        }

        #[cfg(target_os = "linux")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config/sha1/config.toml")
        }

        #[cfg(not(target_os = "linux"))]
        {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("sha1")
                .join("config.toml")
        }
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        let file = self
            .config_path
            .exists()
            .then(|| Toml::file(&self.config_path));
        Self::extract(file, true)
    }

    /// Merge the layers, extract and validate
    fn extract(file: Option<Data<Toml>>, with_env: bool) -> Result<AppConfig> {
        // Layer 1: Defaults
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        // Layer 2: Config file (if exists)
        if let Some(file) = file {
            figment = figment.merge(file);
        }

        // Layer 3: Environment variables
        if with_env {
            figment = figment.merge(Env::prefixed("SHA1_").split("__"));
        }

        let config: AppConfig = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        self.list()?
            .into_iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
            .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))
    }

    /// Set a configuration value by key (dot notation) in the config file
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parsed_value = Self::parse_config_value(key, value)?;

        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            toml::from_str(&content)?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let Some((section, field)) = key.split_once('.') else {
            anyhow::bail!("Key must have the form <section>.<field>: {}", key);
        };

        let toml::Value::Table(root) = &mut config else {
            anyhow::bail!("Configuration file is not a table");
        };
        let table = root
            .entry(section.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
        let toml::Value::Table(table) = table else {
            anyhow::bail!("Invalid key path: expected table at '{}'", section);
        };
        table.insert(field.to_string(), parsed_value);

        // The file must still load once edited; the environment is not part of it
        let toml_string = toml::to_string_pretty(&config)?;
        Self::extract(Some(Toml::string(&toml_string)), false)
            .with_context(|| format!("Value '{value}' is not valid for '{key}'"))?;

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config_path, toml_string)?;
        Ok(())
    }

    /// List all effective configuration values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    /// Recursively collect all key-value pairs from TOML
    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        match value {
            toml::Value::Table(table) => {
                for (key, val) in table {
                    let new_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    Self::collect_values(val, new_prefix, items);
                }
            }
            toml::Value::String(s) => items.push((prefix, s.clone())),
            toml::Value::Integer(i) => items.push((prefix, i.to_string())),
            toml::Value::Boolean(b) => items.push((prefix, b.to_string())),
            _ => {}
        }
    }

    /// Parse a value to the TOML type the key expects
    fn parse_config_value(key: &str, value: &str) -> Result<toml::Value> {
        match key {
            "engine.chunk_size" | "engine.max_concurrent_files" => {
                let num: i64 = value
                    .parse()
                    .with_context(|| format!("{key} must be a positive integer"))?;
                if num <= 0 {
                    anyhow::bail!("{} must be greater than 0", key);
                }
                Ok(toml::Value::Integer(num))
            }
            "output.uppercase" | "output.color_enabled" => {
                let b: bool = value.parse().context("Value must be 'true' or 'false'")?;
                Ok(toml::Value::Boolean(b))
            }
            "output.default_format" => {
                crate::output::OutputFormat::from_string(value)?;
                Ok(toml::Value::String(value.to_lowercase()))
            }
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        }
    }
}

/// Load the effective configuration from the default location
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(temp_dir.path().join("config.toml"))
    }

    #[test]
    fn test_defaults_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = manager(&temp_dir).load().unwrap();

        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.output.default_format, "text");
    }

    #[test]
    fn test_file_layer_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("config.toml"),
            "[engine]\nchunk_size = 4096\n\n[output]\nuppercase = true\n",
        )
        .unwrap();

        let config = manager(&temp_dir).load().unwrap();
        assert_eq!(config.engine.chunk_size, 4096);
        assert_eq!(config.engine.max_concurrent_files, 4);
        assert!(config.output.uppercase);
    }

    #[test]
    fn test_invalid_file_value_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("config.toml"),
            "[engine]\nchunk_size = 0\n",
        )
        .unwrap();

        let err = manager(&temp_dir).load().unwrap_err();
        assert!(format!("{err:#}").contains("chunk_size"));
    }

    #[test]
    fn test_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut config_manager = manager(&temp_dir);

        config_manager.set("engine.chunk_size", "8192").unwrap();
        config_manager.set("output.default_format", "JSON").unwrap();

        assert_eq!(config_manager.get("engine.chunk_size").unwrap(), "8192");
        assert_eq!(config_manager.get("output.default_format").unwrap(), "json");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let temp_dir = TempDir::new().unwrap();
        let mut config_manager = manager(&temp_dir);

        assert!(config_manager.set("engine.chunk_size", "0").is_err());
        assert!(config_manager.set("engine.chunk_size", "lots").is_err());
        assert!(config_manager.set("output.uppercase", "maybe").is_err());
        assert!(config_manager.set("output.default_format", "xml").is_err());
        assert!(config_manager.set("nonsense", "1").is_err());
        assert!(
            config_manager
                .set("engine.chunk_size", "9223372036854775807")
                .is_err()
        );
        assert!(
            config_manager
                .set("engine.max_concurrent_files", "1000000")
                .is_err()
        );
        assert!(!config_manager.get_config_path().exists());
    }

    #[test]
    fn test_set_leaves_file_untouched_when_result_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let original = "[engine]\nchunk_size = 0\n";
        fs::write(&path, original).unwrap();

        let mut config_manager = manager(&temp_dir);
        assert!(config_manager.set("output.uppercase", "true").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_invalid_default_format_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("config.toml"),
            "[output]\ndefault_format = \"xml\"\n",
        )
        .unwrap();

        let err = manager(&temp_dir).load().unwrap_err();
        assert!(format!("{err:#}").contains("default_format"));
    }

    #[test]
    fn test_list_is_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let items = manager(&temp_dir).list().unwrap();
        let keys: Vec<_> = items.iter().map(|(k, _)| k.as_str()).collect();

        assert_eq!(
            keys,
            vec![
                "engine.chunk_size",
                "engine.max_concurrent_files",
                "output.color_enabled",
                "output.default_format",
                "output.uppercase",
            ]
        );
    }
}
