//! Web 模块的数据类型定义

use serde::{Deserialize, Serialize};

use crate::translation::assist::AnalysisKind;
use crate::translation::client::ChatTurn;
use crate::translation::core::{EngineOutput, EngineStatus, HealthStatus, ServiceStatsSnapshot};
use crate::translation::glossary::GlossaryTerm;
use crate::translation::review::ReviewFinding;
use crate::translation::router::EngineKind;
use crate::translation::types::{LegalDomain, TranslationConfiguration, TranslationStyle, UiLanguage};
use crate::translation::TranslationService;

/// 应用状态
pub struct AppState {
    pub service: TranslationService,
    pub access_token: Option<String>,
}

impl AppState {
    pub fn new(service: TranslationService, access_token: Option<String>) -> Self {
        Self { service, access_token }
    }
}

/// 引擎查询请求
#[derive(Deserialize)]
pub struct EngineRequest {
    pub style: TranslationStyle,
}

/// 引擎查询响应
#[derive(Serialize)]
pub struct EngineResponse {
    pub engine: EngineKind,
    pub label: &'static str,
}

impl From<EngineKind> for EngineResponse {
    fn from(engine: EngineKind) -> Self {
        Self {
            engine,
            label: engine.label(),
        }
    }
}

/// 翻译请求
#[derive(Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    #[serde(default)]
    pub config: TranslationConfiguration,
}

/// 翻译响应
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub engine: EngineKind,
    pub engine_label: &'static str,
    pub text: String,
    pub status: EngineStatus,
}

impl From<EngineOutput> for TranslateResponse {
    fn from(output: EngineOutput) -> Self {
        Self {
            engine: output.engine,
            engine_label: output.engine.label(),
            text: output.text,
            status: output.status,
        }
    }
}

/// 术语复核请求
#[derive(Deserialize)]
pub struct ReviewRequest {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub config: TranslationConfiguration,
}

/// 术语复核响应
#[derive(Serialize)]
pub struct ReviewResponse {
    pub findings: Vec<ReviewFinding>,
    pub violations: usize,
}

/// 合规审计请求
#[derive(Deserialize)]
pub struct AuditRequest {
    pub source: String,
    pub target: String,
}

/// 文本分析请求
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    pub kind: AnalysisKind,
    #[serde(default)]
    pub lang: UiLanguage,
}

/// 润色请求
#[derive(Deserialize)]
pub struct PolishRequest {
    pub text: String,
}

/// 对话请求
#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    pub message: String,
}

/// 纯文本结果
#[derive(Serialize)]
pub struct TextResponse {
    pub text: String,
}

/// 领域术语表响应
#[derive(Serialize)]
pub struct GlossaryResponse {
    pub domain: LegalDomain,
    pub label: &'static str,
    pub terms: Vec<GlossaryTerm>,
}

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    pub version: &'static str,
    pub health: HealthStatus,
    pub stats: ServiceStatsSnapshot,
}
