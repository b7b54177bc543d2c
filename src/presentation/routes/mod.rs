// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::review_service::ReviewService;
use crate::presentation::handlers::review_handler;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 返回值
///
/// 返回挂载了评论服务与请求追踪的路由
pub fn routes(service: Arc<ReviewService>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/version", get(version));

    let api_routes = Router::new()
        .route("/api/generate-review", post(review_handler::generate_review))
        .layer(Extension(service));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
