use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file structure for profilens.
///
/// Allows users to save common settings and reuse them across runs.
/// Configuration files are loaded from the current directory, a specified
/// path, or the platform config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Analysis service settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Output format preferences
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    /// Analysis service base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// LLM model the service should use
    #[serde(default = "default_model")]
    pub model: String,

    /// Delay between status checks, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Summary,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Summary,
            pretty: false,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5001".to_string()
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_poll_interval_ms() -> u64 {
    2000
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./profilens.toml
    /// 3. ./profilens.json
    /// 4. ./profilens.yaml
    /// 5. ./profilens.yml
    /// 6. {config dir}/profilens/config.toml
    ///
    /// Returns default configuration if no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        let candidates = [
            "profilens.toml",
            "profilens.json",
            "profilens.yaml",
            "profilens.yml",
        ];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Self::load_from_path(path);
            }
        }

        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        // No config file found, return defaults
        Ok(Self::default())
    }

    /// Platform config file location, e.g. `~/.config/profilens/config.toml`.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("profilens").join("config.toml"))
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            _ => {
                // Try TOML first, then JSON, then YAML
                toml::from_str(&contents)
                    .or_else(|_| serde_json::from_str(&contents))
                    .or_else(|_| serde_yaml::from_str(&contents))
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))
            }
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("yaml") | Some("yml") => serde_yaml::to_string(self)?,
            _ => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://localhost:5001");
        assert_eq!(config.server.model, "llama3");
        assert_eq!(config.server.poll_interval_ms, 2000);
        assert!(!config.output.pretty);
        assert!(matches!(config.output.format, OutputFormat::Summary));
    }

    #[test]
    fn test_load_toml_config() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        let toml_content = r#"
[server]
base-url = "https://analysis.example.com"
model = "mistral"
poll-interval-ms = 500

[output]
format = "json"
pretty = true
"#;
        write!(temp_file, "{}", toml_content).unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.server.base_url, "https://analysis.example.com");
        assert_eq!(config.server.model, "mistral");
        assert_eq!(config.server.poll_interval_ms, 500);
        assert!(matches!(config.output.format, OutputFormat::Json));
        assert!(config.output.pretty);
    }

    #[test]
    fn test_load_json_config() {
        let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
        let json_content = r#"{
  "server": {
    "base-url": "https://analysis.json.com"
  },
  "output": {
    "format": "json"
  }
}"#;
        write!(temp_file, "{}", json_content).unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.server.base_url, "https://analysis.json.com");
        // Unset keys keep their defaults.
        assert_eq!(config.server.model, "llama3");
        assert!(matches!(config.output.format, OutputFormat::Json));
    }

    #[test]
    fn test_load_yaml_config() {
        let mut temp_file = NamedTempFile::with_suffix(".yaml").unwrap();
        write!(
            temp_file,
            "server:\n  base-url: https://analysis.yaml.com\n  poll-interval-ms: 1000\n"
        )
        .unwrap();

        let config = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.server.base_url, "https://analysis.yaml.com");
        assert_eq!(config.server.poll_interval_ms, 1000);
    }

    #[test]
    fn test_load_nonexistent_explicit_path_fails() {
        let result = Config::load(Some(Path::new("nonexistent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_save_round_trips() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("profilens.toml");

        let mut config = Config::default();
        config.server.base_url = "https://saved.example.com".to_string();
        config.output.pretty = true;
        config.save(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.server.base_url, "https://saved.example.com");
        assert!(loaded.output.pretty);
    }
}
