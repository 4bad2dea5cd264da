//! 生成式后端客户端
//!
//! 核心只负责构造请求（模型、系统指令、用户内容、采样参数、可选的结构化
//! 响应模式）并读取文本结果。真正的网络调用由 [`GenerativeClient`] 的实现完成。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::translation::config::ServiceConfig;
use crate::translation::error::{TranslationError, TranslationResult};

/// 对话角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// 一轮对话内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// 发往生成式后端的请求
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    pub contents: Vec<ChatTurn>,
    pub temperature: f32,
    pub max_output_tokens: Option<u32>,
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    /// 创建只包含一条用户内容的请求
    pub fn new(model: impl Into<String>, user_content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_instruction: None,
            contents: vec![ChatTurn::user(user_content)],
            temperature: 0.0,
            max_output_tokens: None,
            response_schema: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// 在当前内容之前插入历史对话
    pub fn with_history(mut self, history: &[ChatTurn]) -> Self {
        let mut contents = history.to_vec();
        contents.append(&mut self.contents);
        self.contents = contents;
        self
    }

    /// 最后一条用户内容
    pub fn user_content(&self) -> &str {
        self.contents
            .iter()
            .rev()
            .find(|turn| turn.role == ChatRole::User)
            .map(|turn| turn.text.as_str())
            .unwrap_or_default()
    }
}

/// 生成式后端能力
///
/// 实现者返回非空文本，或返回描述失败原因的错误。
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> TranslationResult<String>;
}

// ============================================================================
// Gemini REST 实现
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent<'a>>,
    contents: Vec<GeminiContent<'a>>,
    generation_config: GeminiGenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig<'a> {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

fn build_request_body(request: &GenerationRequest) -> GeminiRequest<'_> {
    GeminiRequest {
        system_instruction: request.system_instruction.as_deref().map(|text| GeminiContent {
            role: None,
            parts: vec![GeminiPart { text }],
        }),
        contents: request
            .contents
            .iter()
            .map(|turn| GeminiContent {
                role: Some(turn.role.as_str()),
                parts: vec![GeminiPart { text: &turn.text }],
            })
            .collect(),
        generation_config: GeminiGenerationConfig {
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
            response_mime_type: request
                .response_schema
                .as_ref()
                .map(|_| "application/json"),
            response_schema: request.response_schema.as_ref(),
        },
    }
}

/// 从响应体中提取第一个候选的文本
fn parse_response_body(body: &str) -> TranslationResult<String> {
    let response: GeminiResponse = serde_json::from_str(body)?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(TranslationError::EmptyResponse);
    }

    Ok(text)
}

/// 基于 Gemini `generateContent` 接口的客户端
pub struct GeminiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_url, model)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> TranslationResult<String> {
        if self.api_key.is_empty() {
            return Err(TranslationError::ConfigError("未配置 API 密钥".to_string()));
        }

        tracing::debug!(
            "发送生成请求: model={}, temperature={}, 内容 {} 字符",
            request.model,
            request.temperature,
            request.user_content().len()
        );

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request_body(request))
            .send()
            .await
            .map_err(|e| TranslationError::from(e).with_context(format!("model={}", request.model)))?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TranslationError::BackendStatus {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        parse_response_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let request = GenerationRequest::new("gemini-2.5-flash", "Olá")
            .with_system_instruction("Translate")
            .with_temperature(0.1)
            .with_max_output_tokens(8192)
            .with_response_schema(json!({ "type": "OBJECT" }));

        let body = serde_json::to_value(build_request_body(&request)).unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Translate");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Olá");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_request_body_omits_optional_fields() {
        let request = GenerationRequest::new("gemini-2.5-flash", "text");
        let body = serde_json::to_value(build_request_body(&request)).unwrap();

        assert!(body.get("systemInstruction").is_none());
        assert!(body["generationConfig"].get("maxOutputTokens").is_none());
        assert!(body["generationConfig"].get("responseMimeType").is_none());
    }

    #[test]
    fn test_history_is_prepended() {
        let history = vec![ChatTurn::user("What is dolo?"), ChatTurn::model("Intent.")];
        let request = GenerationRequest::new("gemini-3-pro-preview", "And culpa?").with_history(&history);

        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[1].role, ChatRole::Model);
        assert_eq!(request.user_content(), "And culpa?");
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Termination "},{"text":"of contract"}]}}]}"#;
        assert_eq!(parse_response_body(body).unwrap(), "Termination of contract");
    }

    #[test]
    fn test_parse_response_empty_and_invalid() {
        assert!(matches!(
            parse_response_body(r#"{"candidates":[]}"#),
            Err(TranslationError::EmptyResponse)
        ));
        assert!(matches!(
            parse_response_body(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#),
            Err(TranslationError::EmptyResponse)
        ));
        assert!(matches!(
            parse_response_body("not json"),
            Err(TranslationError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let config = ServiceConfig {
            api_key: String::new(),
            ..ServiceConfig::default()
        };
        let client = GeminiClient::new(&config);
        let request = GenerationRequest::new("gemini-2.5-flash", "text");

        assert!(matches!(
            client.generate(&request).await,
            Err(TranslationError::ConfigError(_))
        ));
    }
}
