//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问

use std::env;
use std::fmt;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 应用运行模式
    pub struct Mode;
    impl EnvVar<String> for Mode {
        const NAME: &'static str = "LEXIGEN_MODE";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Application mode: development, staging, production";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("production".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "development" | "dev" => Ok("development".to_string()),
                "staging" | "stage" => Ok("staging".to_string()),
                "production" | "prod" => Ok("production".to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid mode '{}'. Use: development, staging, production", value),
                }),
            }
        }
    }

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "LEXIGEN_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Invalid log level '{}'. Use: trace, debug, info, warn, error", value),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 遵循标准：任何值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }
}

/// 生成式后端相关环境变量
pub mod backend {
    use super::*;

    /// API 基础地址
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "LEXIGEN_API_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Generative backend base URL";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API URL must start with http:// or https://".to_string(),
                })
            }
        }
    }

    /// API 密钥
    pub struct ApiKey;
    impl EnvVar<String> for ApiKey {
        const NAME: &'static str = "LEXIGEN_API_KEY";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Generative backend API key (falls back to GEMINI_API_KEY)";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME).or_else(|_| env::var(FALLBACK_API_KEY)) {
                Ok(value) => Self::parse(&value),
                Err(_) => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Required environment variable not set".to_string(),
                }),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            let key = value.trim();
            if key.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API key cannot be empty".to_string(),
                });
            }
            Ok(key.to_string())
        }
    }

    const FALLBACK_API_KEY: &str = "GEMINI_API_KEY";

    /// 上下文引擎模型覆盖
    pub struct TranslationModel;
    impl EnvVar<String> for TranslationModel {
        const NAME: &'static str = "LEXIGEN_MODEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Model override for the contextual engine";

        fn parse(value: &str) -> EnvResult<String> {
            parse_model(value, Self::NAME)
        }
    }

    /// 辅助模型
    pub struct AuxiliaryModel;
    impl EnvVar<String> for AuxiliaryModel {
        const NAME: &'static str = "LEXIGEN_AUXILIARY_MODEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Model for the rigid engine, audit, analysis and polishing";

        fn parse(value: &str) -> EnvResult<String> {
            parse_model(value, Self::NAME)
        }
    }

    /// 对话模型
    pub struct ChatModel;
    impl EnvVar<String> for ChatModel {
        const NAME: &'static str = "LEXIGEN_CHAT_MODEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Model for the legal assistant chat";

        fn parse(value: &str) -> EnvResult<String> {
            parse_model(value, Self::NAME)
        }
    }

    /// 刚性引擎最大输出长度
    pub struct RigidMaxOutputTokens;
    impl EnvVar<u32> for RigidMaxOutputTokens {
        const NAME: &'static str = "LEXIGEN_RIGID_MAX_OUTPUT_TOKENS";
        const DEFAULT: Option<u32> = None;
        const DESCRIPTION: &'static str = "Maximum output tokens for the rigid engine";

        fn parse(value: &str) -> EnvResult<u32> {
            parse_bounded(value, Self::NAME, 256, 65536).map(|n| n as u32)
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "LEXIGEN_WEB_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Web server bind address";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("127.0.0.1".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Address cannot be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "LEXIGEN_WEB_PORT";
        const DEFAULT: Option<u16> = Some(7080);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            let port: u16 = value.parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid port number (1-65535)".to_string(),
            })?;

            if port == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Port cannot be 0".to_string(),
                });
            }

            Ok(port)
        }
    }
}

/// 安全相关环境变量
pub mod security {
    use super::*;

    /// 访问令牌，设置后所有 API 请求都需要携带
    pub struct AccessToken;
    impl EnvVar<String> for AccessToken {
        const NAME: &'static str = "LEXIGEN_ACCESS_TOKEN";
        const DEFAULT: Option<String> = None; // 无默认值，未设置时不启用鉴权
        const DESCRIPTION: &'static str = "Bearer token required on /api requests";

        fn parse(value: &str) -> EnvResult<String> {
            let token = value.trim();
            if token.len() < 8 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Access token must be at least 8 characters".to_string(),
                });
            }
            Ok(token.to_string())
        }
    }

    /// CORS允许的源
    pub struct CorsOrigins;
    impl EnvVar<Vec<String>> for CorsOrigins {
        const NAME: &'static str = "LEXIGEN_CORS_ORIGINS";
        const DEFAULT: Option<Vec<String>> = None;
        const DESCRIPTION: &'static str = "CORS allowed origins (comma-separated)";

        fn get() -> EnvResult<Vec<String>> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(vec!["*".to_string()]),
            }
        }

        fn parse(value: &str) -> EnvResult<Vec<String>> {
            Ok(value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect())
        }
    }
}

/// 辅助函数
fn parse_model(value: &str, var_name: &str) -> EnvResult<String> {
    let model = value.trim();
    if model.is_empty() || model.contains(char::is_whitespace) || model.contains('/') {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Invalid model identifier '{}'", value),
        });
    }
    Ok(model.to_string())
}

fn parse_bounded(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    // 核心配置
    pub mode: String,
    pub log_level: String,
    pub no_color: bool,

    // 后端配置
    pub api_url: Option<String>,
    pub api_key_configured: bool,

    // Web配置
    pub web_bind_address: String,
    pub web_port: u16,

    // 安全配置
    pub access_token: Option<String>,
    pub cors_origins: Vec<String>,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            mode: core::Mode::get()?,
            log_level: core::LogLevel::get()?,
            no_color: core::NoColor::get()?,

            api_url: backend::ApiUrl::get().ok(),
            api_key_configured: backend::ApiKey::get().is_ok(),

            web_bind_address: web::BindAddress::get()?,
            web_port: web::Port::get()?,

            access_token: security::AccessToken::get().ok(),
            cors_origins: security::CorsOrigins::get()?,
        })
    }

    /// 打印配置摘要（隐藏敏感信息）
    pub fn print_summary(&self) {
        println!("Environment Configuration Summary:");
        println!("  Mode: {}", self.mode);
        println!("  Log Level: {}", self.log_level);
        println!(
            "  API Key: {}",
            if self.api_key_configured { "[configured]" } else { "[missing]" }
        );
        println!("  Web Server: {}:{}", self.web_bind_address, self.web_port);
        if self.access_token.is_some() {
            println!("  Access Token: [configured]");
        }
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    docs.push_str("## Core Configuration\n\n");
    push_doc::<core::Mode, String>(&mut docs);
    push_doc::<core::LogLevel, String>(&mut docs);
    push_doc::<core::NoColor, bool>(&mut docs);

    docs.push_str("\n## Backend Configuration\n\n");
    push_doc::<backend::ApiUrl, String>(&mut docs);
    push_doc::<backend::ApiKey, String>(&mut docs);
    push_doc::<backend::TranslationModel, String>(&mut docs);
    push_doc::<backend::AuxiliaryModel, String>(&mut docs);
    push_doc::<backend::ChatModel, String>(&mut docs);
    push_doc::<backend::RigidMaxOutputTokens, u32>(&mut docs);

    docs.push_str("\n## Web Server Configuration\n\n");
    push_doc::<web::BindAddress, String>(&mut docs);
    push_doc::<web::Port, u16>(&mut docs);
    push_doc::<security::AccessToken, String>(&mut docs);
    push_doc::<security::CorsOrigins, Vec<String>>(&mut docs);

    docs
}

fn push_doc<V: EnvVar<T>, T>(docs: &mut String) {
    docs.push_str(&format!("- `{}`: {}\n", V::NAME, V::DESCRIPTION));
}
