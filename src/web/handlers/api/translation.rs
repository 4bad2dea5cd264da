//! 翻译相关API处理器

use std::sync::Arc;

use axum::{
    extract::{Json as ExtractJson, Path, State},
    response::Json,
};

use super::{bad_request, ApiError};
use crate::translation::glossary::system_terms;
use crate::translation::router::engine_for_style;
use crate::translation::types::{Language, LegalDomain, UiLanguage, SUPPORTED_LANGUAGES};
use crate::web::types::{
    AppState, EngineRequest, EngineResponse, GlossaryResponse, TranslateRequest, TranslateResponse,
};

/// 查询风格对应的引擎
pub async fn select_engine(ExtractJson(request): ExtractJson<EngineRequest>) -> Json<EngineResponse> {
    Json(engine_for_style(request.style).into())
}

/// 翻译文本
pub async fn translate_text(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    request.config.validate().map_err(bad_request)?;

    let output = state.service.translate(&request.text, &request.config).await;
    Ok(Json(output.into()))
}

/// 支持的语言列表
pub async fn list_languages() -> Json<&'static [Language]> {
    Json(SUPPORTED_LANGUAGES)
}

/// 领域的系统术语
pub async fn domain_glossary(Path(domain): Path<String>) -> Result<Json<GlossaryResponse>, ApiError> {
    let domain: LegalDomain = domain.parse().map_err(bad_request)?;

    Ok(Json(GlossaryResponse {
        domain,
        label: domain.label(UiLanguage::En),
        terms: system_terms(domain),
    }))
}
