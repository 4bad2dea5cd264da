//! 翻译服务配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, ServiceConfig};

/// 配置常量
pub mod constants {
    // 默认API设置
    pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    pub const DEFAULT_AUXILIARY_MODEL: &str = "gemini-2.5-flash";
    pub const DEFAULT_CHAT_MODEL: &str = "gemini-3-pro-preview";

    // 采样参数
    pub const PRECISE_TEMPERATURE: f32 = 0.1;
    pub const CREATIVE_TEMPERATURE: f32 = 0.4;
    pub const RIGID_TEMPERATURE: f32 = 0.0;
    pub const AUDIT_TEMPERATURE: f32 = 0.1;
    pub const ANALYSIS_TEMPERATURE: f32 = 0.3;
    pub const POLISH_TEMPERATURE: f32 = 0.1;
    pub const CHAT_TEMPERATURE: f32 = 1.0;
    pub const DEFAULT_RIGID_MAX_OUTPUT_TOKENS: u32 = 8192;

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "lexigen.toml",
        ".lexigen.toml",
        "lexigen.json",
        "~/.config/lexigen/config.toml",
        "/etc/lexigen/config.toml",
    ];

    // .env 文件搜索顺序
    pub const ENV_FILES: &[&str] = &[".env.local", ".env.development", ".env.production", ".env"];
}

/// 检查是否存在配置文件
pub fn config_file_exists() -> bool {
    constants::CONFIG_PATHS
        .iter()
        .any(|path| std::path::Path::new(shellexpand::tilde(path).as_ref()).exists())
}

/// 加载服务配置，失败时退回默认值
pub fn load_service_config() -> ServiceConfig {
    match ConfigManager::new() {
        Ok(manager) => manager.into_config(),
        Err(e) => {
            tracing::warn!("配置加载失败，使用默认配置: {}", e);
            let mut config = ServiceConfig::default();
            config.apply_env_overrides();
            config
        }
    }
}
