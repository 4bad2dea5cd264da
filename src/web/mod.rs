//! Web 服务器模块
//!
//! 以 JSON API 的形式提供翻译、审计、复核和辅助功能

pub mod auth;
pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use config::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware, Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::translation::error::{helpers::internal_error, TranslationError, TranslationResult};
use crate::translation::TranslationService;

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    service: TranslationService,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, service: TranslationService) -> Self {
        Self { config, service }
    }

    /// 启动 Web 服务器
    pub async fn start(self) -> TranslationResult<()> {
        let listen_address = self.config.listen_address();
        let app_state = Arc::new(AppState::new(self.service, self.config.access_token.clone()));
        let app = create_router(app_state, &self.config);

        let listener = tokio::net::TcpListener::bind(&listen_address)
            .await
            .map_err(|e| TranslationError::NetworkError(format!("Failed to bind server: {}", e)))?;

        tracing::info!("Web server starting at http://{}", listen_address);

        axum::serve(listener, app)
            .await
            .map_err(|e| internal_error(format!("Server error: {}", e)))?;

        Ok(())
    }
}

fn cors_layer(config: &WebConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("忽略无效的 CORS 来源: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>, config: &WebConfig) -> Router {
    create_routes()
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth::require_access_token,
        ))
        .with_state(app_state)
        .layer(cors_layer(config))
}
