//! 翻译引擎
//!
//! 两种后端共享同一个 `translate(text, configuration)` 接口：
//!
//! - **刚性引擎**：固定词汇、逐字翻译，使用独立的提示词组装器和最低采样温度
//! - **上下文引擎**：使用共享组装器，按风格调整采样温度
//!
//! 引擎从不向调用方返回错误。后端失败时返回固定的兜底文本，
//! 后端返回空内容时返回固定的空结果文本，调用方可以通过
//! [`EngineStatus`] 区分这三种情况。

use std::sync::Arc;

use serde::Serialize;

use crate::translation::client::{GenerationRequest, GenerativeClient};
use crate::translation::config::ServiceConfig;
use crate::translation::error::TranslationError;
use crate::translation::prompt::{ContextualComposer, InstructionComposer, RigidComposer};
use crate::translation::router::EngineKind;
use crate::translation::types::TranslationConfiguration;

/// 上下文引擎调用失败时的兜底文本
pub const CONTEXTUAL_FAILURE_TEXT: &str =
    "Error generating translation. Please check your API key and try again.";
/// 上下文引擎返回空内容时的文本
pub const CONTEXTUAL_EMPTY_TEXT: &str = "Error: No translation generated.";
/// 刚性引擎调用失败时的兜底文本
pub const RIGID_FAILURE_TEXT: &str = "Error in MarianMT Engine.";
/// 刚性引擎返回空内容时的文本
pub const RIGID_EMPTY_TEXT: &str = "MarianMT Error";

/// 单次翻译的结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineStatus {
    Translated,
    Empty,
    Failed,
}

/// 单次翻译的输出
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineOutput {
    pub engine: EngineKind,
    pub text: String,
    pub status: EngineStatus,
}

impl EngineOutput {
    pub fn is_translated(&self) -> bool {
        self.status == EngineStatus::Translated
    }
}

/// 翻译引擎
pub struct TranslationEngine {
    kind: EngineKind,
    client: Arc<dyn GenerativeClient>,
    composer: Box<dyn InstructionComposer>,
    auxiliary_model: String,
    model_override: Option<String>,
}

impl TranslationEngine {
    /// 创建刚性引擎
    pub fn rigid(client: Arc<dyn GenerativeClient>, service: &ServiceConfig) -> Self {
        Self {
            kind: EngineKind::Rigid,
            client,
            composer: Box::new(RigidComposer {
                max_output_tokens: service.rigid_max_output_tokens,
            }),
            auxiliary_model: service.auxiliary_model.clone(),
            model_override: None,
        }
    }

    /// 创建上下文引擎
    pub fn contextual(client: Arc<dyn GenerativeClient>, service: &ServiceConfig) -> Self {
        Self {
            kind: EngineKind::Contextual,
            client,
            composer: Box::new(ContextualComposer),
            auxiliary_model: service.auxiliary_model.clone(),
            model_override: service.translation_model.clone(),
        }
    }

    /// 按引擎类型创建
    pub fn for_kind(kind: EngineKind, client: Arc<dyn GenerativeClient>, service: &ServiceConfig) -> Self {
        match kind {
            EngineKind::Rigid => Self::rigid(client, service),
            EngineKind::Contextual => Self::contextual(client, service),
        }
    }

    /// 替换提示词组装器
    pub fn with_composer(mut self, composer: Box<dyn InstructionComposer>) -> Self {
        self.composer = composer;
        self
    }

    pub fn kind(&self) -> EngineKind {
        self.kind
    }

    /// 本次请求使用的模型
    pub fn model_for(&self, config: &TranslationConfiguration) -> String {
        match self.kind {
            EngineKind::Rigid => self.auxiliary_model.clone(),
            EngineKind::Contextual => self
                .model_override
                .clone()
                .unwrap_or_else(|| config.model.as_str().to_string()),
        }
    }

    pub fn failure_text(&self) -> &'static str {
        match self.kind {
            EngineKind::Rigid => RIGID_FAILURE_TEXT,
            EngineKind::Contextual => CONTEXTUAL_FAILURE_TEXT,
        }
    }

    pub fn empty_text(&self) -> &'static str {
        match self.kind {
            EngineKind::Rigid => RIGID_EMPTY_TEXT,
            EngineKind::Contextual => CONTEXTUAL_EMPTY_TEXT,
        }
    }

    /// 构造发往后端的请求
    pub fn build_request(&self, text: &str, config: &TranslationConfiguration) -> GenerationRequest {
        let prompt = self.composer.compose(text, config);

        let mut request = GenerationRequest::new(self.model_for(config), prompt.user_payload)
            .with_system_instruction(prompt.system_instructions)
            .with_temperature(prompt.sampling.temperature);
        if let Some(max_output_tokens) = prompt.sampling.max_output_tokens {
            request = request.with_max_output_tokens(max_output_tokens);
        }
        request
    }

    /// 翻译文本，永不返回错误
    pub async fn translate(&self, text: &str, config: &TranslationConfiguration) -> EngineOutput {
        let request = self.build_request(text, config);

        tracing::info!(
            "{} 开始翻译: {} -> {}, 输入 {} 字符",
            self.kind.label(),
            config.source_lang,
            config.target_lang,
            text.len()
        );

        let (text, status) = match self.client.generate(&request).await {
            Ok(translated) => {
                tracing::info!("翻译完成，输出 {} 字符", translated.len());
                (translated, EngineStatus::Translated)
            }
            Err(TranslationError::EmptyResponse) => {
                tracing::warn!("{} 返回空内容", self.kind.label());
                (self.empty_text().to_string(), EngineStatus::Empty)
            }
            Err(e) => {
                e.log(self.kind.label());
                (self.failure_text().to_string(), EngineStatus::Failed)
            }
        };

        EngineOutput {
            engine: self.kind,
            text,
            status,
        }
    }
}
