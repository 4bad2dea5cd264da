//! 辅助 AI 功能：文本分析、润色和法律助手对话
//!
//! 与翻译引擎一样，这些调用失败时都会返回固定的兜底值。

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::translation::client::{ChatTurn, GenerationRequest, GenerativeClient};
use crate::translation::config::{constants, ServiceConfig};
use crate::translation::error::TranslationError;
use crate::translation::types::UiLanguage;

pub const ANALYSIS_FAILURE_TEXT: &str = "Error during analysis.";
pub const ANALYSIS_EMPTY_TEXT: &str = "No analysis available.";
pub const CHAT_FAILURE_TEXT: &str = "Sorry, I encountered an error processing your request.";
pub const CHAT_EMPTY_TEXT: &str = "I couldn't generate a response.";

const POLISH_INSTRUCTION: &str = "You are a specialized legal editor. Your task is to correct grammar, \
improve clarity, and ensure a professional legal tone in the text provided. IMPORTANT: you must preserve \
all XML-like tags (e.g. <DOC>, <H1>, <P>) exactly as they appear. Do not remove or alter the tags. \
Only edit the text content within the tags.";

const CHAT_INSTRUCTION: &str = "You are a helpful, professional legal assistant embedded in the LexiGen \
translation workbench. You help users understand legal documents, terms and clauses. You do not provide \
legal advice, but you explain concepts clearly.";

/// 分析类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Summary,
    Risk,
    Format,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Summary => "summary",
            AnalysisKind::Risk => "risk",
            AnalysisKind::Format => "format",
        }
    }

    /// 按界面语言选择系统指令
    pub fn instruction(&self, lang: UiLanguage) -> &'static str {
        match (lang, self) {
            (UiLanguage::En, AnalysisKind::Summary) => {
                "Summarize the following legal text concisely for a lawyer."
            }
            (UiLanguage::En, AnalysisKind::Risk) => {
                "Analyze the following text for potential legal risks, ambiguities, or unfavorable clauses."
            }
            (UiLanguage::En, AnalysisKind::Format) => {
                "Check the following text for formatting inconsistencies or missing tags based on a standard XML document structure."
            }
            (UiLanguage::Pt, AnalysisKind::Summary) => {
                "Resuma o texto jurídico a seguir de forma concisa para um advogado. Responda em Português do Brasil."
            }
            (UiLanguage::Pt, AnalysisKind::Risk) => {
                "Analise o texto a seguir em busca de riscos jurídicos potenciais, ambiguidades, cláusulas leoninas ou desfavoráveis. Forneça uma lista estruturada dos riscos identificados. Responda em Português do Brasil."
            }
            (UiLanguage::Pt, AnalysisKind::Format) => {
                "Verifique o texto a seguir quanto a inconsistências de formatação ou tags XML ausentes com base na estrutura do documento. Responda em Português."
            }
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(AnalysisKind::Summary),
            "risk" => Ok(AnalysisKind::Risk),
            "format" => Ok(AnalysisKind::Format),
            _ => Err(format!("未知的分析类型: {}", value)),
        }
    }
}

/// 辅助功能集合
pub struct Assistant {
    client: Arc<dyn GenerativeClient>,
    auxiliary_model: String,
    chat_model: String,
}

impl Assistant {
    pub fn new(client: Arc<dyn GenerativeClient>, config: &ServiceConfig) -> Self {
        Self {
            client,
            auxiliary_model: config.auxiliary_model.clone(),
            chat_model: config.chat_model.clone(),
        }
    }

    /// 调用后端，将空响应和失败分别映射为对应的文本
    async fn generate_or(
        &self,
        request: GenerationRequest,
        operation: &str,
        on_empty: impl FnOnce() -> String,
        on_failure: impl FnOnce() -> String,
    ) -> String {
        match self.client.generate(&request).await {
            Ok(text) => text,
            Err(TranslationError::EmptyResponse) => {
                tracing::warn!("{}: 后端返回空内容", operation);
                on_empty()
            }
            Err(e) => {
                e.log(operation);
                on_failure()
            }
        }
    }

    /// 文本分析
    pub async fn analyze(&self, text: &str, kind: AnalysisKind, lang: UiLanguage) -> String {
        tracing::debug!("文本分析: kind={}, {} 字符", kind, text.len());

        let request = GenerationRequest::new(&self.auxiliary_model, text)
            .with_system_instruction(kind.instruction(lang))
            .with_temperature(constants::ANALYSIS_TEMPERATURE);

        self.generate_or(
            request,
            "文本分析",
            || ANALYSIS_EMPTY_TEXT.to_string(),
            || ANALYSIS_FAILURE_TEXT.to_string(),
        )
        .await
    }

    /// 润色文本，失败时原样返回输入
    pub async fn improve(&self, text: &str) -> String {
        tracing::debug!("文本润色: {} 字符", text.len());

        let request = GenerationRequest::new(&self.auxiliary_model, text)
            .with_system_instruction(POLISH_INSTRUCTION)
            .with_temperature(constants::POLISH_TEMPERATURE);

        self.generate_or(request, "文本润色", || text.to_string(), || text.to_string())
            .await
    }

    /// 法律助手对话
    pub async fn chat(&self, history: &[ChatTurn], message: &str) -> String {
        tracing::debug!("助手对话: 历史 {} 轮", history.len());

        let request = GenerationRequest::new(&self.chat_model, message)
            .with_system_instruction(CHAT_INSTRUCTION)
            .with_temperature(constants::CHAT_TEMPERATURE)
            .with_history(history);

        self.generate_or(
            request,
            "助手对话",
            || CHAT_EMPTY_TEXT.to_string(),
            || CHAT_FAILURE_TEXT.to_string(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::error::TranslationResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct EchoClient {
        requests: Mutex<Vec<GenerationRequest>>,
        result: fn(&GenerationRequest) -> TranslationResult<String>,
    }

    #[async_trait]
    impl GenerativeClient for EchoClient {
        async fn generate(&self, request: &GenerationRequest) -> TranslationResult<String> {
            self.requests.lock().unwrap().push(request.clone());
            (self.result)(request)
        }
    }

    fn build(result: fn(&GenerationRequest) -> TranslationResult<String>) -> (Arc<EchoClient>, Assistant) {
        let client = Arc::new(EchoClient {
            requests: Mutex::new(Vec::new()),
            result,
        });
        let assistant = Assistant::new(client.clone(), &ServiceConfig::default());
        (client, assistant)
    }

    #[tokio::test]
    async fn test_analyze_uses_localized_instruction() {
        let (client, assistant) = build(|_| Ok("Resumo".to_string()));

        let result = assistant.analyze("texto", AnalysisKind::Risk, UiLanguage::Pt).await;
        assert_eq!(result, "Resumo");

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests[0].model, constants::DEFAULT_AUXILIARY_MODEL);
        assert_eq!(requests[0].temperature, constants::ANALYSIS_TEMPERATURE);
        assert!(requests[0].system_instruction.as_deref().unwrap().contains("cláusulas leoninas"));
    }

    #[tokio::test]
    async fn test_analyze_sentinels() {
        let (_, failing) = build(|_| Err(TranslationError::NetworkError("down".to_string())));
        assert_eq!(
            failing.analyze("x", AnalysisKind::Summary, UiLanguage::En).await,
            ANALYSIS_FAILURE_TEXT
        );

        let (_, empty) = build(|_| Err(TranslationError::EmptyResponse));
        assert_eq!(
            empty.analyze("x", AnalysisKind::Format, UiLanguage::En).await,
            ANALYSIS_EMPTY_TEXT
        );
    }

    #[tokio::test]
    async fn test_improve_returns_input_on_failure() {
        let (_, failing) = build(|_| Err(TranslationError::BackendStatus {
            status: 500,
            message: "boom".to_string(),
        }));
        assert_eq!(failing.improve("<P>texto</P>").await, "<P>texto</P>");

        let (_, empty) = build(|_| Err(TranslationError::EmptyResponse));
        assert_eq!(empty.improve("<P>texto</P>").await, "<P>texto</P>");
    }

    #[tokio::test]
    async fn test_chat_sends_history_to_chat_model() {
        let (client, assistant) = build(|request| Ok(format!("{} turns", request.contents.len())));
        let history = vec![ChatTurn::user("What is dolo?"), ChatTurn::model("Intent.")];

        assert_eq!(assistant.chat(&history, "And culpa?").await, "3 turns");

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests[0].model, constants::DEFAULT_CHAT_MODEL);
        assert_eq!(requests[0].user_content(), "And culpa?");
    }

    #[tokio::test]
    async fn test_chat_failure_text() {
        let (_, assistant) = build(|_| Err(TranslationError::NetworkError("down".to_string())));
        assert_eq!(assistant.chat(&[], "hi").await, CHAT_FAILURE_TEXT);
    }

    #[test]
    fn test_analysis_kind_parsing() {
        assert_eq!("Risk".parse::<AnalysisKind>(), Ok(AnalysisKind::Risk));
        assert!("poem".parse::<AnalysisKind>().is_err());
    }
}
