//! 辅助功能API处理器

use std::sync::Arc;

use axum::{
    extract::{Json as ExtractJson, State},
    response::Json,
};

use super::{bad_request, ApiError};
use crate::web::types::{AnalyzeRequest, AppState, ChatRequest, PolishRequest, TextResponse};

pub async fn analyze_text(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<AnalyzeRequest>,
) -> Json<TextResponse> {
    let text = state
        .service
        .analyze(&request.text, request.kind, request.lang)
        .await;
    Json(TextResponse { text })
}

pub async fn polish_text(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<PolishRequest>,
) -> Json<TextResponse> {
    let text = state.service.improve(&request.text).await;
    Json(TextResponse { text })
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<ChatRequest>,
) -> Result<Json<TextResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(bad_request("消息不能为空"));
    }

    let text = state.service.chat(&request.history, &request.message).await;
    Ok(Json(TextResponse { text }))
}
