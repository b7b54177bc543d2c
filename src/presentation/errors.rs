// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::utils::errors::ReviewError;

/// 未能从错误中得到信息时返回的兜底文本
pub const FALLBACK_ERROR_MESSAGE: &str = "Unknown error";

/// 应用错误类型
///
/// 封装所有可能的应用层错误，统一转换为 `{ "error": string }` 响应
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<ReviewError>() {
            Some(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut error_message = self.0.to_string();
        if error_message.trim().is_empty() {
            error_message = FALLBACK_ERROR_MESSAGE.to_string();
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
