//! Web 路由定义

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::web::{handlers::*, types::AppState};

/// 创建 API 路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/languages", get(list_languages))
        .route("/api/glossary/:domain", get(domain_glossary))
        .route("/api/engine", post(select_engine))
        .route("/api/translate", post(translate_text))
        .route("/api/review", post(review_translation))
        .route("/api/audit", post(audit_translation))
        .route("/api/analyze", post(analyze_text))
        .route("/api/polish", post(polish_text))
        .route("/api/chat", post(chat))
}
