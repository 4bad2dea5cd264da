// 集成测试公共模块
//
// 提供可编排响应的后端客户端和测试文档

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use lexigen::translation::client::{GenerationRequest, GenerativeClient};
use lexigen::translation::config::ServiceConfig;
use lexigen::translation::error::{TranslationError, TranslationResult};
use lexigen::translation::TranslationService;

/// 按顺序回放预设响应并记录所有请求的客户端
///
/// 响应队列为空时返回网络错误。
#[derive(Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<TranslationResult<String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

#[allow(dead_code)]
impl ScriptedClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replying(texts: &[&str]) -> Arc<Self> {
        let client = Self::new();
        for text in texts {
            client.push_ok(text);
        }
        client
    }

    pub fn push_ok(&self, text: &str) {
        self.responses.lock().unwrap().push_back(Ok(text.to_string()));
    }

    pub fn push_err(&self, error: TranslationError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> GenerationRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeClient for ScriptedClient {
    async fn generate(&self, request: &GenerationRequest) -> TranslationResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TranslationError::NetworkError("no scripted response".to_string())))
    }
}

/// 使用脚本客户端创建服务
#[allow(dead_code)]
pub fn scripted_service(client: Arc<ScriptedClient>) -> TranslationService {
    let config = ServiceConfig {
        api_key: "test-key".to_string(),
        ..ServiceConfig::default()
    };
    TranslationService::with_client(client, config)
}

/// 测试文档
#[allow(dead_code)]
pub mod documents {
    pub const CONTRACT_SOURCE: &str = "<H1>Contrato de Prestação de Serviços</H1>\n\
        <H2>Cláusula 1 - Rescisão</H2>\n\
        A Rescisão do contrato exige aviso prévio de 30 dias.<FOOTNOTE id=\"1\">Ver art. 473 do Código Civil.</FOOTNOTE>\n\
        <TAB[r1c1]>Valor</TAB[r1c1]><TAB[r1c2]>R$ 10.000,00</TAB[r1c2]>\n\
        O Foro da comarca de São Paulo é competente. <XREF target=\"§3\">Ver §3</XREF>";

    pub const CONTRACT_TARGET: &str = "<H1>Service Agreement</H1>\n\
        <H2>Clause 1 - Termination</H2>\n\
        Termination of the contract requires 30 days' notice.<FOOTNOTE id=\"1\">See art. 473 of the Civil Code.</FOOTNOTE>\n\
        <TAB[r1c1]>Amount</TAB[r1c1]><TAB[r1c2]>BRL 10,000.00</TAB[r1c2]>\n\
        The courts of São Paulo have jurisdiction. <XREF target=\"§3\">See §3</XREF>";

    pub const AUDIT_REPORT_JSON: &str = r#"{
        "score": 92,
        "summary": "Structure preserved; venue term deviates from glossary.",
        "items": [
            {"id": "h1", "category": "Headings", "status": "pass", "message": "2 headings in order"},
            {"id": "t1", "category": "Tables", "status": "pass", "message": "2 cells preserved"},
            {"id": "f1", "category": "Footnotes", "status": "pass", "message": "id 1 preserved"},
            {"id": "n1", "category": "Numbers", "status": "pass", "message": "Amount converted"},
            {"id": "g1", "category": "Terminology", "status": "warning", "message": "Foro not rendered as Venue"}
        ]
    }"#;
}
