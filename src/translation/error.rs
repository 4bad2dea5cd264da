//! 翻译模块统一错误处理
//!
//! 错误只在边界内部流动：客户端与配置层返回 `TranslationResult`，
//! 引擎、审计和辅助操作负责把它们转换成可展示的兜底值。

use std::fmt;

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 网络错误
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 后端返回非成功状态码
    #[error("后端返回错误状态 {status}: {message}")]
    BackendStatus { status: u16, message: String },

    /// 后端返回空内容
    #[error("后端未返回任何内容")]
    EmptyResponse,

    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 解析错误
    #[error("解析错误: {0}")]
    ParseError(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    SerializationError(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl TranslationError {
    /// 检查错误是否可重试
    ///
    /// 仅供调用方参考，核心本身从不自动重试。
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslationError::NetworkError(_) => true,
            TranslationError::BackendStatus { status, .. } => *status == 429 || *status >= 500,
            TranslationError::EmptyResponse => true,
            TranslationError::ConfigError(_) => false,
            TranslationError::InvalidInput(_) => false,
            TranslationError::ParseError(_) => false,
            TranslationError::SerializationError(_) => false,
            TranslationError::InternalError(_) => false,
        }
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::NetworkError(_) => ErrorSeverity::Warning,
            TranslationError::BackendStatus { .. } => ErrorSeverity::Error,
            TranslationError::EmptyResponse => ErrorSeverity::Warning,
            TranslationError::InvalidInput(_) => ErrorSeverity::Info,
            TranslationError::ParseError(_) => ErrorSeverity::Error,
            TranslationError::SerializationError(_) => ErrorSeverity::Error,
            TranslationError::InternalError(_) => ErrorSeverity::Critical,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::ConfigError(_) => ErrorCategory::Configuration,
            TranslationError::NetworkError(_) => ErrorCategory::Network,
            TranslationError::BackendStatus { .. } => ErrorCategory::Service,
            TranslationError::EmptyResponse => ErrorCategory::Service,
            TranslationError::InvalidInput(_) => ErrorCategory::Input,
            TranslationError::ParseError(_) => ErrorCategory::Parsing,
            TranslationError::SerializationError(_) => ErrorCategory::Serialization,
            TranslationError::InternalError(_) => ErrorCategory::Internal,
        }
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(mut self, context: T) -> Self {
        let current_msg = self.to_string();
        let new_msg = format!("{} (上下文: {})", current_msg, context);

        match &mut self {
            TranslationError::ConfigError(ref mut msg) => *msg = new_msg,
            TranslationError::NetworkError(ref mut msg) => *msg = new_msg,
            TranslationError::InvalidInput(ref mut msg) => *msg = new_msg,
            TranslationError::ParseError(ref mut msg) => *msg = new_msg,
            TranslationError::SerializationError(ref mut msg) => *msg = new_msg,
            TranslationError::InternalError(ref mut msg) => *msg = new_msg,
            TranslationError::BackendStatus { ref mut message, .. } => *message = new_msg,
            TranslationError::EmptyResponse => {
                return TranslationError::EmptyResponse;
            }
        }

        self
    }

    /// 记录错误日志
    pub fn log(&self, operation: &str) {
        let category = self.category();
        let retryable = self.is_retryable();
        match self.severity() {
            ErrorSeverity::Info => tracing::info!(?category, retryable, "{}: {}", operation, self),
            ErrorSeverity::Warning => tracing::warn!(?category, retryable, "{}: {}", operation, self),
            ErrorSeverity::Error | ErrorSeverity::Critical => {
                tracing::error!(?category, retryable, "{}: {}", operation, self)
            }
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Input,
    Service,
    Parsing,
    Serialization,
    Internal,
}

impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::ConfigError(format!("IO错误: {}", error))
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::ParseError(format!("JSON解析错误: {}", error))
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ConfigError(format!("TOML解析错误: {}", error))
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            TranslationError::ParseError(format!("响应解码失败: {}", error))
        } else if let Some(status) = error.status() {
            TranslationError::BackendStatus {
                status: status.as_u16(),
                message: error.to_string(),
            }
        } else {
            TranslationError::NetworkError(error.to_string())
        }
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::ConfigError(msg.to_string())
    }

    /// 创建输入验证错误
    pub fn validation_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::InvalidInput(msg.to_string())
    }

    /// 创建内部错误
    pub fn internal_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::InternalError(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_status_retryability() {
        let throttled = TranslationError::BackendStatus {
            status: 429,
            message: "quota".to_string(),
        };
        let rejected = TranslationError::BackendStatus {
            status: 400,
            message: "bad request".to_string(),
        };

        assert!(throttled.is_retryable());
        assert!(!rejected.is_retryable());
        assert_eq!(rejected.category(), ErrorCategory::Service);
    }

    #[test]
    fn test_with_context_keeps_variant() {
        let error = helpers::validation_error("empty text").with_context("translate");

        match error {
            TranslationError::InvalidInput(msg) => {
                assert!(msg.contains("empty text"));
                assert!(msg.contains("translate"));
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::Warning);
        assert_eq!(
            TranslationError::EmptyResponse.severity(),
            ErrorSeverity::Warning
        );
    }
}
