//! Web 服务器配置
//!
//! 使用类型安全的环境变量系统进行配置管理

use crate::env::{EnvError, EnvResult, EnvVar};

/// Web 服务器配置
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// 绑定地址
    pub bind_addr: String,
    /// 端口
    pub port: u16,
    /// 访问令牌，为空时不启用鉴权
    pub access_token: Option<String>,
    /// CORS 允许的源，包含 `*` 时允许任意来源
    pub cors_origins: Vec<String>,
}

impl WebConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        use crate::env::{security, web};

        // 令牌未设置时不启用鉴权，但格式错误必须报告
        let access_token = match std::env::var(security::AccessToken::NAME) {
            Ok(value) => Some(security::AccessToken::parse(&value)?),
            Err(_) => None,
        };

        Ok(Self {
            bind_addr: web::BindAddress::get()?,
            port: web::Port::get()?,
            access_token,
            cors_origins: security::CorsOrigins::get()?,
        })
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.bind_addr.is_empty() {
            return Err(EnvError {
                variable: "LEXIGEN_WEB_BIND_ADDRESS".to_string(),
                message: "Bind address cannot be empty".to_string(),
            });
        }

        if self.port == 0 {
            return Err(EnvError {
                variable: "LEXIGEN_WEB_PORT".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.access_token.is_none() {
            tracing::warn!("未设置 LEXIGEN_ACCESS_TOKEN，API 不做鉴权");
        }

        Ok(())
    }

    /// 获取完整的监听地址
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// 是否允许任意来源
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|origin| origin == "*")
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!("Failed to load web config from environment: {}. Using defaults.", e);
            Self {
                bind_addr: "127.0.0.1".to_string(),
                port: 7080,
                access_token: None,
                cors_origins: vec!["*".to_string()],
            }
        })
    }
}
