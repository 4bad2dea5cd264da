//! API 处理器

pub mod assistant;
pub mod compliance;
pub mod system;
pub mod translation;

pub use assistant::*;
pub use compliance::*;
pub use system::*;
pub use translation::*;

use axum::{http::StatusCode, response::Json};

/// 处理器的错误响应
pub type ApiError = (StatusCode, Json<serde_json::Value>);

pub(crate) fn bad_request(message: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message.to_string() })),
    )
}
