//! 法律文档翻译核心
//!
//! - **types**: 翻译配置、风格、领域等数据模型
//! - **glossary**: 系统术语与自定义术语
//! - **router**: 按风格选择翻译引擎
//! - **prompt**: 提示词组装
//! - **client**: 生成式后端客户端
//! - **core**: 翻译引擎与统一服务
//! - **audit** / **review**: 合规审计与术语复核
//! - **assist**: 分析、润色和助手对话
//! - **config** / **error**: 配置管理与错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use lexigen::translation::{TranslationConfiguration, TranslationService, LegalDomain};
//!
//! # async fn example() {
//! let service = TranslationService::from_env();
//! let config = TranslationConfiguration {
//!     legal_domain: LegalDomain::Contracts,
//!     ..Default::default()
//! };
//!
//! let output = service.translate("<H1>Rescisão</H1>", &config).await;
//! println!("{}: {}", output.engine, output.text);
//! # }
//! ```

pub mod assist;
pub mod audit;
pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod glossary;
pub mod prompt;
pub mod review;
pub mod router;
pub mod types;

pub use assist::{AnalysisKind, Assistant};
pub use audit::{ComplianceAuditor, ComplianceCategory, ComplianceItem, ComplianceReport, ComplianceStatus};
pub use client::{ChatRole, ChatTurn, GeminiClient, GenerationRequest, GenerativeClient};
pub use config::{ConfigManager, ServiceConfig};
pub use self::core::{EngineOutput, EngineStatus, TranslationEngine, TranslationService};
pub use error::{TranslationError, TranslationResult};
pub use glossary::{merged_terms, system_terms, CustomGlossary, GlossaryTerm, TermDomain};
pub use prompt::{compose, ComposedPrompt, InstructionComposer, SamplingParams};
pub use review::{compare, ReviewFinding};
pub use router::{select_engine, EngineKind};
pub use types::{
    AiModel, DateStyle, Language, LegalDomain, TranslationConfiguration, TranslationStyle, UiLanguage,
    SUPPORTED_LANGUAGES,
};
