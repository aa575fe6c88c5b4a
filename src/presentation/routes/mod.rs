// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::domain::services::scraping_service::ScrapingService;
use crate::presentation::handlers::{product_handler, scrape_handler};
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};

/// 创建应用路由
///
/// # 参数
///
/// * `service` - 抓取服务
/// * `auth_state` - 认证状态，保护 `/scrape` 与 `/products`
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(service: Arc<ScrapingService>, auth_state: AuthState) -> Router {
    let public_routes = Router::new().route("/health", get(health_check));

    let protected_routes = Router::new()
        .route("/scrape", post(scrape_handler::trigger_scrape))
        .route("/products", get(product_handler::list_products))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .layer(Extension(service));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
    }))
}
