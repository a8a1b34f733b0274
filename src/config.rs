//! Skin-type classification service configuration

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub inference: InferenceConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    pub device: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub path: PathBuf,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn default_path() -> &'static str {
        "config.toml"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig { port: 3000 },
            inference: InferenceConfig {
                device: "CPU".to_string(),
            },
            model: ModelConfig {
                path: PathBuf::from("models/skintype.onnx"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [server]
            port = 8080

            [inference]
            device = "GPU"

            [model]
            path = "models/custom.onnx"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.inference.device, "GPU");
        assert_eq!(config.model.path, PathBuf::from("models/custom.onnx"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.inference.device, "CPU");
    }
}
