//! 简化的配置管理器
//!
//! 解析顺序：`.env` 文件 → 配置文件 → 默认值 → 环境变量覆盖 → 验证

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::translation::error::{helpers::config_error, TranslationError, TranslationResult};

/// 生成式后端服务配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// API 基础地址
    pub api_url: String,
    /// API 密钥，为空时所有调用都会走兜底值
    #[serde(skip_serializing)]
    pub api_key: String,
    /// 覆盖上下文引擎的模型，为空时使用请求配置中的模型
    pub translation_model: Option<String>,
    /// 刚性引擎、审计、分析和润色使用的模型
    pub auxiliary_model: String,
    /// 对话助手使用的模型
    pub chat_model: String,
    /// 刚性引擎的最大输出长度
    pub rigid_max_output_tokens: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_url: constants::DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            translation_model: None,
            auxiliary_model: constants::DEFAULT_AUXILIARY_MODEL.to_string(),
            chat_model: constants::DEFAULT_CHAT_MODEL.to_string(),
            rigid_max_output_tokens: constants::DEFAULT_RIGID_MAX_OUTPUT_TOKENS,
        }
    }
}

impl ServiceConfig {
    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(config_error(format!(
                "API 地址必须以 http:// 或 https:// 开头: {}",
                self.api_url
            )));
        }

        if self.auxiliary_model.trim().is_empty() || self.chat_model.trim().is_empty() {
            return Err(config_error("模型名称不能为空"));
        }

        if self.rigid_max_output_tokens == 0 {
            return Err(config_error("最大输出长度不能为0"));
        }

        Ok(())
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{backend, EnvVar};

        if let Ok(api_url) = backend::ApiUrl::get() {
            self.api_url = api_url;
            tracing::info!("环境变量覆盖 API 地址: {}", self.api_url);
        }

        if let Ok(api_key) = backend::ApiKey::get() {
            self.api_key = api_key;
        }

        if let Ok(model) = backend::TranslationModel::get() {
            self.translation_model = Some(model);
        }

        if let Ok(model) = backend::AuxiliaryModel::get() {
            self.auxiliary_model = model;
        }

        if let Ok(model) = backend::ChatModel::get() {
            self.chat_model = model;
        }

        if let Ok(max_tokens) = backend::RigidMaxOutputTokens::get() {
            self.rigid_max_output_tokens = max_tokens;
        }
    }

    /// 是否配置了 API 密钥
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// 简化的配置管理器
pub struct ConfigManager {
    config: ServiceConfig,
}

impl ConfigManager {
    /// 创建新的配置管理器
    pub fn new() -> TranslationResult<Self> {
        let mut config = Self::load_config()?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 从指定文件创建配置管理器
    pub fn from_file(path: &str) -> TranslationResult<Self> {
        let mut config = Self::load_from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    pub fn into_config(self) -> ServiceConfig {
        self.config
    }

    /// 从文件加载配置
    fn load_config() -> TranslationResult<ServiceConfig> {
        Self::load_dotenv();

        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                tracing::info!("加载配置文件: {}", expanded_path);
                return Self::load_from_file(&expanded_path);
            }
        }

        tracing::info!("未找到配置文件，使用默认配置");
        Ok(ServiceConfig::default())
    }

    /// 从指定文件加载配置
    fn load_from_file(path: &str) -> TranslationResult<ServiceConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranslationError::ConfigError(format!("读取配置文件失败: {}", e)))?;

        Self::parse(path, &content)
    }

    /// 按扩展名解析配置内容
    fn parse(path: &str, content: &str) -> TranslationResult<ServiceConfig> {
        if path.ends_with(".toml") {
            toml::from_str(content)
                .map_err(|e| TranslationError::ConfigError(format!("解析TOML配置失败: {}", e)))
        } else {
            serde_json::from_str(content)
                .map_err(|e| TranslationError::ConfigError(format!("解析JSON配置失败: {}", e)))
        }
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        for env_file in constants::ENV_FILES {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::info!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &str) -> TranslationResult<()> {
        let config = ServiceConfig::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| TranslationError::SerializationError(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TranslationError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.has_api_key());
        assert_eq!(config.auxiliary_model, "gemini-2.5-flash");
    }

    #[test]
    fn test_parse_toml_with_partial_fields() {
        let content = r#"
            api_url = "http://localhost:8080/v1beta"
            chat_model = "gemini-2.5-flash"
        "#;

        let config = ConfigManager::parse("lexigen.toml", content).unwrap();
        assert_eq!(config.api_url, "http://localhost:8080/v1beta");
        assert_eq!(config.chat_model, "gemini-2.5-flash");
        assert_eq!(config.rigid_max_output_tokens, 8192);
    }

    #[test]
    fn test_parse_json_config() {
        let content = r#"{ "translation_model": "gemini-2.5-flash", "rigid_max_output_tokens": 4096 }"#;

        let config = ConfigManager::parse("lexigen.json", content).unwrap();
        assert_eq!(config.translation_model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(config.rigid_max_output_tokens, 4096);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ServiceConfig {
            api_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ServiceConfig {
            rigid_max_output_tokens: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_example_config_skips_api_key() {
        let config = ServiceConfig {
            api_key: "secret-key".to_string(),
            ..Default::default()
        };
        let content = toml::to_string_pretty(&config).unwrap();
        assert!(!content.contains("secret-key"));
    }
}
