//! API 访问令牌校验
//!
//! 配置了访问令牌时，所有 `/api` 请求都必须携带 `Authorization: Bearer <token>`。

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use crate::web::types::AppState;

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

/// 令牌校验中间件
pub async fn require_access_token(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.access_token.as_deref() else {
        return next.run(request).await;
    };

    if bearer_token(&request) == Some(expected) {
        return next.run(request).await;
    }

    tracing::warn!("拒绝未授权的请求: {}", request.uri().path());
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "error": "未授权的访问" })),
    )
        .into_response()
}
