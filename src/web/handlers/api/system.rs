//! 服务状态API处理器

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::web::types::{AppState, HealthResponse};

/// 健康检查与运行统计
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        version: env!("CARGO_PKG_VERSION"),
        health: state.service.get_health(),
        stats: state.service.get_stats().snapshot(),
    })
}
