//! 审计与复核API处理器

use std::sync::Arc;

use axum::{
    extract::{Json as ExtractJson, State},
    response::Json,
};

use super::{bad_request, ApiError};
use crate::translation::audit::ComplianceReport;
use crate::translation::review::violations;
use crate::web::types::{AppState, AuditRequest, ReviewRequest, ReviewResponse};

/// 术语复核（本地执行）
pub async fn review_translation(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ApiError> {
    request.config.validate().map_err(bad_request)?;

    let findings = state
        .service
        .review(&request.source, &request.target, &request.config);
    let violations = violations(&findings);

    Ok(Json(ReviewResponse { findings, violations }))
}

/// 合规审计，失败时返回兜底报告
pub async fn audit_translation(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<AuditRequest>,
) -> Json<ComplianceReport> {
    Json(state.service.audit(&request.source, &request.target).await)
}
