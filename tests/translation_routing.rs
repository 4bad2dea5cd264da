//! 引擎路由与翻译流程集成测试

use lexigen::translation::config::constants;
use lexigen::translation::core::engine::{
    CONTEXTUAL_EMPTY_TEXT, CONTEXTUAL_FAILURE_TEXT, RIGID_FAILURE_TEXT,
};
use lexigen::translation::{
    glossary::system_terms, AiModel, EngineKind, EngineStatus, LegalDomain, TranslationConfiguration,
    TranslationError, TranslationStyle,
};

mod common {
    include!("common/mod.rs");
}

use common::{documents, scripted_service, ScriptedClient};

fn configuration(style: TranslationStyle, domain: LegalDomain) -> TranslationConfiguration {
    TranslationConfiguration {
        style,
        legal_domain: domain,
        ..Default::default()
    }
}

/// 法律风格 + 合同领域：路由到刚性引擎，提示词包含全部合同术语
#[tokio::test]
async fn test_legal_contracts_routes_to_rigid_engine() {
    let client = ScriptedClient::replying(&[documents::CONTRACT_TARGET]);
    let service = scripted_service(client.clone());
    let config = configuration(TranslationStyle::Legal, LegalDomain::Contracts);

    assert_eq!(config.active_engine(), EngineKind::Rigid);

    let output = service.translate(documents::CONTRACT_SOURCE, &config).await;
    assert_eq!(output.engine, EngineKind::Rigid);
    assert_eq!(output.status, EngineStatus::Translated);
    assert_eq!(output.text, documents::CONTRACT_TARGET);

    let request = client.last_request();
    let instructions = request.system_instruction.as_deref().expect("rigid engine sends instructions");
    assert!(instructions.contains("Rescisão -> Termination"));
    for term in system_terms(LegalDomain::Contracts) {
        assert!(instructions.contains(&term.directive()), "missing {}", term.directive());
    }

    assert_eq!(request.model, constants::DEFAULT_AUXILIARY_MODEL);
    assert_eq!(request.temperature, constants::RIGID_TEMPERATURE);
    assert_eq!(request.max_output_tokens, Some(constants::DEFAULT_RIGID_MAX_OUTPUT_TOKENS));
    assert!(request.user_content().ends_with(documents::CONTRACT_SOURCE));
}

#[tokio::test]
async fn test_contextual_engine_uses_shared_composer() {
    let client = ScriptedClient::replying(&["Translated"]);
    let service = scripted_service(client.clone());
    let mut config = configuration(TranslationStyle::Marketing, LegalDomain::Tax);
    config.model = AiModel::Gemini25Flash;
    config.custom_terms.add("Nota Fiscal", "Invoice");

    let output = service.translate("<H1>Imposto de Renda</H1>", &config).await;
    assert_eq!(output.engine, EngineKind::Contextual);
    assert_eq!(output.text, "Translated");

    let request = client.last_request();
    let instructions = request.system_instruction.as_deref().unwrap();
    assert!(instructions.contains("# Strict layout rules"));
    assert!(instructions.contains("# Mode: Marketing"));
    assert!(instructions.contains("- Imposto de Renda -> Income Tax"));
    assert!(instructions.contains("- Nota Fiscal -> Invoice"));
    assert!(instructions.contains("Tax/Fiscal"));

    assert_eq!(request.model, "gemini-2.5-flash");
    assert_eq!(request.temperature, constants::CREATIVE_TEMPERATURE);
    assert!(request.max_output_tokens.is_none());
    assert!(request.user_content().contains("- style: Marketing"));
}

#[tokio::test]
async fn test_changing_style_reroutes_without_other_changes() {
    let client = ScriptedClient::replying(&["one", "two"]);
    let service = scripted_service(client.clone());
    let mut config = configuration(TranslationStyle::Legal, LegalDomain::Criminal);

    let first = service.translate("Réu", &config).await;
    config.style = TranslationStyle::Formal;
    let second = service.translate("Réu", &config).await;

    assert_eq!(first.engine, EngineKind::Rigid);
    assert_eq!(second.engine, EngineKind::Contextual);

    let requests = client.requests();
    assert_eq!(requests[0].temperature, constants::RIGID_TEMPERATURE);
    assert_eq!(requests[1].temperature, constants::PRECISE_TEMPERATURE);
}

#[tokio::test]
async fn test_backend_failures_resolve_to_sentinels() {
    let client = ScriptedClient::new();
    client.push_err(TranslationError::BackendStatus {
        status: 429,
        message: "quota".to_string(),
    });
    client.push_err(TranslationError::NetworkError("timeout".to_string()));
    client.push_err(TranslationError::EmptyResponse);
    let service = scripted_service(client.clone());

    let rigid = service
        .translate("texto", &configuration(TranslationStyle::Legal, LegalDomain::General))
        .await;
    assert_eq!(rigid.text, RIGID_FAILURE_TEXT);
    assert_eq!(rigid.status, EngineStatus::Failed);

    let contextual = configuration(TranslationStyle::Academic, LegalDomain::General);
    assert_eq!(service.translate("texto", &contextual).await.text, CONTEXTUAL_FAILURE_TEXT);
    assert_eq!(service.translate("texto", &contextual).await.text, CONTEXTUAL_EMPTY_TEXT);

    // 不会自动重试
    assert_eq!(client.request_count(), 3);

    let stats = service.get_stats().snapshot();
    assert_eq!(stats.rigid_translations, 1);
    assert_eq!(stats.contextual_translations, 2);
    assert_eq!(stats.failed_translations, 3);
}

#[tokio::test]
async fn test_general_domain_without_custom_terms_omits_glossary() {
    let client = ScriptedClient::replying(&["ok"]);
    let service = scripted_service(client.clone());

    service
        .translate("texto", &configuration(TranslationStyle::Colloquial, LegalDomain::General))
        .await;

    let instructions = client.last_request().system_instruction.unwrap();
    assert!(!instructions.contains("Glossary"));
}
