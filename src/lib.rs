//! # LexiGen
//!
//! 面向结构化法律文档的翻译工作台核心库。
//!
//! ## 模块组织
//!
//! - `translation` - 引擎路由、提示词组装、术语表、合规审计与复核
//! - `env` - 类型化的环境变量
//! - `web` - HTTP API 服务（可选）

pub mod env;
pub mod translation;
#[cfg(feature = "web")]
pub mod web;

pub use translation::{
    EngineKind, EngineOutput, TranslationConfiguration, TranslationError, TranslationResult, TranslationService,
};
