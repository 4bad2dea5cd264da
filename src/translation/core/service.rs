//! 统一翻译服务
//!
//! 对外的主要入口：持有生成式后端客户端和服务配置，
//! 按请求配置选择引擎、执行翻译、审计、复核和辅助操作。
//!
//! 服务本身不保存任何文档状态，每次调用的结果都直接返回给调用方。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use super::engine::{EngineOutput, EngineStatus, TranslationEngine};
use crate::translation::assist::{AnalysisKind, Assistant};
use crate::translation::audit::{ComplianceAuditor, ComplianceReport};
use crate::translation::client::{ChatTurn, GeminiClient, GenerativeClient};
use crate::translation::config::{load_service_config, ServiceConfig};
use crate::translation::glossary::merged_terms;
use crate::translation::review::{compare, ReviewFinding};
use crate::translation::router::EngineKind;
use crate::translation::types::{TranslationConfiguration, UiLanguage};

/// 翻译服务
pub struct TranslationService {
    client: Arc<dyn GenerativeClient>,
    config: ServiceConfig,
    stats: ServiceStats,
}

impl TranslationService {
    /// 使用 Gemini 客户端创建服务
    pub fn new(config: ServiceConfig) -> Self {
        let client: Arc<dyn GenerativeClient> = Arc::new(GeminiClient::new(&config));
        Self::with_client(client, config)
    }

    /// 从配置文件和环境变量创建服务
    pub fn from_env() -> Self {
        Self::new(load_service_config())
    }

    /// 使用自定义后端客户端创建服务
    pub fn with_client(client: Arc<dyn GenerativeClient>, config: ServiceConfig) -> Self {
        if !config.has_api_key() {
            tracing::warn!("未配置 API 密钥，所有生成式调用都将返回兜底结果");
        }

        Self {
            client,
            config,
            stats: ServiceStats::default(),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn get_stats(&self) -> &ServiceStats {
        &self.stats
    }

    /// 为请求配置构造对应的引擎
    pub fn engine_for(&self, config: &TranslationConfiguration) -> TranslationEngine {
        let kind = config.active_engine();
        tracing::debug!("风格 {} 选择引擎: {}", config.style, kind);
        TranslationEngine::for_kind(kind, self.client.clone(), &self.config)
    }

    /// 翻译文本
    pub async fn translate(&self, text: &str, config: &TranslationConfiguration) -> EngineOutput {
        let start = Instant::now();
        let output = self.engine_for(config).translate(text, config).await;

        self.stats.add_processing_time(start.elapsed());
        self.stats.add_chars_processed(text.len());
        self.stats.record_translation(output.engine, output.status);

        output
    }

    /// 合规审计
    pub async fn audit(&self, source: &str, target: &str) -> ComplianceReport {
        let start = Instant::now();
        let result = ComplianceAuditor::new(self.client.clone(), &self.config.auxiliary_model)
            .try_audit(source, target)
            .await;

        self.stats.add_processing_time(start.elapsed());
        self.stats.record_audit(result.is_err());

        result.unwrap_or_else(|e| {
            e.log("合规审计");
            ComplianceReport::fallback()
        })
    }

    /// 按请求配置的领域和自定义术语复核译文
    pub fn review(&self, source: &str, target: &str, config: &TranslationConfiguration) -> Vec<ReviewFinding> {
        let terms = merged_terms(config.legal_domain, config.custom_terms.as_slice());
        compare(source, target, &terms)
    }

    fn assistant(&self) -> Assistant {
        self.stats.inc_auxiliary_calls();
        Assistant::new(self.client.clone(), &self.config)
    }

    pub async fn analyze(&self, text: &str, kind: AnalysisKind, lang: UiLanguage) -> String {
        self.assistant().analyze(text, kind, lang).await
    }

    pub async fn improve(&self, text: &str) -> String {
        self.assistant().improve(text).await
    }

    pub async fn chat(&self, history: &[ChatTurn], message: &str) -> String {
        self.assistant().chat(history, message).await
    }

    /// 检查服务健康状态
    pub fn get_health(&self) -> HealthStatus {
        let mut components = HashMap::new();

        let config_level = match self.config.validate() {
            Ok(()) => HealthLevel::Healthy,
            Err(e) => {
                tracing::warn!("配置检查失败: {}", e);
                HealthLevel::Unhealthy
            }
        };
        components.insert("config".to_string(), config_level);

        // 没有密钥时服务仍可响应，但只能返回兜底值
        let backend_level = if self.config.has_api_key() {
            HealthLevel::Healthy
        } else {
            HealthLevel::Degraded
        };
        components.insert("backend".to_string(), backend_level);

        let overall = if components.values().all(|&level| level == HealthLevel::Healthy) {
            HealthLevel::Healthy
        } else if components.values().any(|&level| level == HealthLevel::Unhealthy) {
            HealthLevel::Unhealthy
        } else {
            HealthLevel::Degraded
        };

        HealthStatus { overall, components }
    }
}

/// 服务运行统计
#[derive(Debug, Default)]
pub struct ServiceStats {
    pub rigid_translations: AtomicUsize,
    pub contextual_translations: AtomicUsize,
    /// 失败或为空的翻译
    pub failed_translations: AtomicUsize,
    pub audits_completed: AtomicUsize,
    pub audits_failed: AtomicUsize,
    pub auxiliary_calls: AtomicUsize,
    pub total_chars_processed: AtomicUsize,
    /// 微秒
    pub processing_time: AtomicU64,
}

impl ServiceStats {
    pub fn record_translation(&self, engine: EngineKind, status: EngineStatus) {
        match engine {
            EngineKind::Rigid => self.rigid_translations.fetch_add(1, Ordering::Relaxed),
            EngineKind::Contextual => self.contextual_translations.fetch_add(1, Ordering::Relaxed),
        };
        if status != EngineStatus::Translated {
            self.failed_translations.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_audit(&self, failed: bool) {
        if failed {
            self.audits_failed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.audits_completed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn inc_auxiliary_calls(&self) {
        self.auxiliary_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_processing_time(&self, duration: Duration) {
        self.processing_time
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn add_chars_processed(&self, count: usize) {
        self.total_chars_processed.fetch_add(count, Ordering::Relaxed);
    }

    /// 获取统计数据快照
    pub fn snapshot(&self) -> ServiceStatsSnapshot {
        ServiceStatsSnapshot {
            rigid_translations: self.rigid_translations.load(Ordering::Relaxed),
            contextual_translations: self.contextual_translations.load(Ordering::Relaxed),
            failed_translations: self.failed_translations.load(Ordering::Relaxed),
            audits_completed: self.audits_completed.load(Ordering::Relaxed),
            audits_failed: self.audits_failed.load(Ordering::Relaxed),
            auxiliary_calls: self.auxiliary_calls.load(Ordering::Relaxed),
            total_chars_processed: self.total_chars_processed.load(Ordering::Relaxed),
            processing_time_ms: self.processing_time.load(Ordering::Relaxed) / 1000,
        }
    }
}

/// 统计数据的不可变快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceStatsSnapshot {
    pub rigid_translations: usize,
    pub contextual_translations: usize,
    pub failed_translations: usize,
    pub audits_completed: usize,
    pub audits_failed: usize,
    pub auxiliary_calls: usize,
    pub total_chars_processed: usize,
    pub processing_time_ms: u64,
}

/// 服务健康状态
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub overall: HealthLevel,
    pub components: HashMap<String, HealthLevel>,
}

/// 健康状态级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    Healthy,
    Degraded,
    Unhealthy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::client::GenerationRequest;
    use crate::translation::error::{TranslationError, TranslationResult};
    use crate::translation::types::{LegalDomain, TranslationStyle};
    use async_trait::async_trait;

    struct Offline;

    #[async_trait]
    impl GenerativeClient for Offline {
        async fn generate(&self, _request: &GenerationRequest) -> TranslationResult<String> {
            Err(TranslationError::NetworkError("offline".to_string()))
        }
    }

    fn service(api_key: &str) -> TranslationService {
        let config = ServiceConfig {
            api_key: api_key.to_string(),
            ..Default::default()
        };
        TranslationService::with_client(Arc::new(Offline), config)
    }

    #[test]
    fn test_engine_for_follows_style() {
        let service = service("key");
        let mut config = TranslationConfiguration::default();
        assert_eq!(service.engine_for(&config).kind(), EngineKind::Rigid);

        config.style = TranslationStyle::Academic;
        assert_eq!(service.engine_for(&config).kind(), EngineKind::Contextual);
    }

    #[tokio::test]
    async fn test_stats_track_failures() {
        let service = service("key");
        let config = TranslationConfiguration::default();

        service.translate("texto", &config).await;
        service.audit("a", "b").await;

        let stats = service.get_stats().snapshot();
        assert_eq!(stats.rigid_translations, 1);
        assert_eq!(stats.failed_translations, 1);
        assert_eq!(stats.audits_failed, 1);
        assert_eq!(stats.total_chars_processed, 5);
    }

    #[test]
    fn test_review_uses_request_glossary() {
        let service = service("key");
        let mut config = TranslationConfiguration {
            legal_domain: LegalDomain::Contracts,
            ..Default::default()
        };
        config.custom_terms.add("Multa", "Penalty");

        let findings = service.review("Rescisão com multa", "Termination with fine", &config);
        assert_eq!(findings.len(), 2);
        assert!(findings[0].compliant);
        assert!(!findings[1].compliant);
    }

    #[test]
    fn test_health_without_api_key_is_degraded() {
        assert_eq!(service("").get_health().overall, HealthLevel::Degraded);
        assert_eq!(service("key").get_health().overall, HealthLevel::Healthy);
    }
}
