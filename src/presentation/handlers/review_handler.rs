// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::rejection::JsonRejection, Extension, Json};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::application::dto::review_request::ReviewRequestDto;
use crate::domain::models::review::ReviewResult;
use crate::domain::services::review_service::ReviewService;
use crate::presentation::errors::AppError;
use crate::utils::errors::ReviewError;

/// `POST /api/generate-review`
///
/// 缺少标题或类型返回 400 且不会调用上游；请求体无法解析及其余失败返回 500，
/// 响应体均为 `{ "error": string }`
pub async fn generate_review(
    Extension(service): Extension<Arc<ReviewService>>,
    payload: Result<Json<ReviewRequestDto>, JsonRejection>,
) -> Result<Json<ReviewResult>, AppError> {
    let request_id = Uuid::new_v4();

    let Json(payload) = payload.map_err(|rejection| {
        warn!(%request_id, error = %rejection.body_text(), "Unreadable review request body");
        ReviewError::MalformedBody(rejection.body_text())
    })?;
    let request = payload.into_request().inspect_err(|err| {
        warn!(%request_id, error = %err, "Rejected review request");
    })?;

    info!(
        %request_id,
        title = %request.title,
        media_type = %request.media_type,
        requested_mode = %request.mode,
        pro = request.pro,
        spoiler = request.spoiler,
        "Generating review"
    );

    let review = service
        .generate_review(&request)
        .instrument(info_span!("generate_review", %request_id))
        .await?;

    Ok(Json(review))
}
