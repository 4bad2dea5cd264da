//! 合规审计
//!
//! 将原文与译文交给外部评估模型，按固定清单（标题、表格、脚注、数字、术语）
//! 比对，并要求返回结构化 JSON。调用失败或返回内容无法解析时，
//! 一律返回零分的兜底报告，不会向调用方返回错误。

use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::translation::client::{GenerationRequest, GenerativeClient};
use crate::translation::config::constants;
use crate::translation::error::{TranslationError, TranslationResult};

/// 兜底报告的摘要
pub const AUDIT_FAILURE_SUMMARY: &str = "Failed to generate audit report due to internal error.";

const AUDIT_INSTRUCTION: &str = "\
You are a strict QA Auditor for Structured Legal Documents.
Compare the SOURCE and TARGET texts and verify the following checklist:

1. HEADINGS: verify that <H1>, <H2>... tags match in count and order.
2. TABLES: verify that <TAB...> tags match in count and structure.
3. FOOTNOTES: verify that <FOOTNOTE id=\"...\"> tags match exactly, including ids.
4. NUMBERS: verify that dates, monetary amounts and statute references are accurate.
5. TERMINOLOGY: verify that key legal terms are translated consistently.

Return a JSON object. For each failure, provide a clear message.";

/// 审计项类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceCategory {
    Headings,
    Tables,
    Footnotes,
    Numbers,
    Terminology,
    Completeness,
}

/// 审计项状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStatus {
    Pass,
    Warning,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceItem {
    #[serde(default)]
    pub id: String,
    pub category: ComplianceCategory,
    pub status: ComplianceStatus,
    #[serde(default)]
    pub message: String,
}

/// 审计报告
///
/// 每次审计都会生成新的报告，不做持久化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub score: u8,
    pub summary: String,
    pub items: Vec<ComplianceItem>,
}

impl ComplianceReport {
    /// 审计失败时的兜底报告
    pub fn fallback() -> Self {
        Self {
            score: 0,
            summary: AUDIT_FAILURE_SUMMARY.to_string(),
            items: Vec::new(),
        }
    }

    pub fn count(&self, status: ComplianceStatus) -> usize {
        self.items.iter().filter(|item| item.status == status).count()
    }
}

#[derive(Debug, Deserialize)]
struct RawReport {
    score: f64,
    summary: String,
    items: Vec<ComplianceItem>,
}

/// 结构化响应模式
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER", "description": "Compliance score 0-100" },
            "summary": { "type": "STRING" },
            "items": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "category": {
                            "type": "STRING",
                            "enum": ["Headings", "Tables", "Footnotes", "Numbers", "Terminology", "Completeness"]
                        },
                        "status": { "type": "STRING", "enum": ["pass", "fail", "warning"] },
                        "message": { "type": "STRING" }
                    },
                    "required": ["category", "status"]
                }
            }
        },
        "required": ["score", "summary", "items"]
    })
}

fn fence_regex() -> Option<&'static Regex> {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    FENCE
        .get_or_init(|| Regex::new(r"(?s)^\s*```[a-zA-Z]*\s*(.*?)\s*```\s*$").ok())
        .as_ref()
}

/// 去掉模型偶尔包裹在 JSON 外面的代码块标记
fn strip_code_fence(text: &str) -> &str {
    fence_regex()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or_else(|| text.trim())
}

/// 解析评估模型返回的报告
pub fn parse_report(text: &str) -> TranslationResult<ComplianceReport> {
    let raw: RawReport = serde_json::from_str(strip_code_fence(text))?;

    if !raw.score.is_finite() {
        return Err(TranslationError::ParseError(format!("无效的评分: {}", raw.score)));
    }

    Ok(ComplianceReport {
        score: raw.score.round().clamp(0.0, 100.0) as u8,
        summary: raw.summary,
        items: raw.items,
    })
}

/// 构造审计请求
pub fn audit_request(model: &str, source: &str, target: &str) -> GenerationRequest {
    GenerationRequest::new(
        model,
        format!("SOURCE DOCUMENT:\n{}\n\nTARGET DOCUMENT:\n{}", source, target),
    )
    .with_system_instruction(AUDIT_INSTRUCTION)
    .with_temperature(constants::AUDIT_TEMPERATURE)
    .with_response_schema(response_schema())
}

/// 合规审计器
pub struct ComplianceAuditor {
    client: Arc<dyn GenerativeClient>,
    model: String,
}

impl ComplianceAuditor {
    pub fn new(client: Arc<dyn GenerativeClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// 审计译文
    ///
    /// 后端错误和无法解析的响应都以 `Err` 返回，由调用方决定兜底。
    pub async fn try_audit(&self, source: &str, target: &str) -> TranslationResult<ComplianceReport> {
        tracing::info!("开始合规审计: 原文 {} 字符, 译文 {} 字符", source.len(), target.len());

        let request = audit_request(&self.model, source, target);
        let text = self.client.generate(&request).await?;
        let report = parse_report(&text)?;

        tracing::info!("审计完成: 得分 {}, {} 项", report.score, report.items.len());
        Ok(report)
    }
}
