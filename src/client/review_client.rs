// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::Value;
use tracing::debug;

use crate::application::dto::review_request::ReviewRequestDto;
use crate::client::transport::{ClientError, ReviewTransport};
use crate::domain::models::review::{MediaType, ReviewMode, ReviewResult};

/// 界面展示用的评论
///
/// 上游结果不保证回显标题，因此保存提交时的标题与类型
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedReview {
    pub title: String,
    pub media_type: MediaType,
    pub review: ReviewResult,
}

/// 客户端状态
#[derive(Debug, Clone, PartialEq)]
pub enum ClientState {
    Idle,
    Submitting { title: String, media_type: MediaType },
    Success(DisplayedReview),
    Error(String),
}

/// 表单内容与显示开关
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewForm {
    pub title: String,
    pub media_type: MediaType,
    pub pro: bool,
    /// 开启时以 detailed 模式提交
    pub show_review: bool,
    pub show_synopsis: bool,
    spoiler_mode: bool,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            media_type: MediaType::Manga,
            pro: false,
            show_review: false,
            show_synopsis: true,
            spoiler_mode: false,
        }
    }
}

impl ReviewForm {
    pub fn spoiler_mode(&self) -> bool {
        self.spoiler_mode
    }

    pub fn mode(&self) -> ReviewMode {
        if self.show_review {
            ReviewMode::Detailed
        } else {
            ReviewMode::Simple
        }
    }

    /// 序列化为请求体；显示开关在提交时转换为 `mode` 与 `spoiler`
    pub fn to_request(&self) -> ReviewRequestDto {
        ReviewRequestDto {
            title: Some(self.title.trim().to_string()),
            media_type: Some(self.media_type.to_string()),
            mode: Some(self.mode().to_string()),
            pro: Some(self.pro),
            spoiler: Some(self.spoiler_mode),
        }
    }
}

/// 评论客户端状态机
///
/// `Idle -> Submitting -> {Success, Error}`，任一终态可以通过 `reset` 或再次提交离开。
/// 提交分为 [`begin_submit`](Self::begin_submit) 与 [`complete`](Self::complete) 两步，
/// [`submit`](Self::submit) 把两步与一次传输调用串起来。
pub struct ReviewClient<T: ReviewTransport> {
    transport: T,
    form: ReviewForm,
    state: ClientState,
}

impl<T: ReviewTransport> ReviewClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            form: ReviewForm::default(),
            state: ClientState::Idle,
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn form(&self) -> &ReviewForm {
        &self.form
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ClientState::Submitting { .. })
    }

    /// 请求进行中时标题输入被禁用
    pub fn input_enabled(&self) -> bool {
        !self.is_loading()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if self.input_enabled() {
            self.form.title = title.into();
        }
    }

    pub fn set_media_type(&mut self, media_type: MediaType) {
        self.form.media_type = media_type;
    }

    pub fn set_pro(&mut self, pro: bool) {
        self.form.pro = pro;
    }

    pub fn toggle_show_review(&mut self) {
        self.form.show_review = !self.form.show_review;
    }

    pub fn toggle_show_synopsis(&mut self) {
        self.form.show_synopsis = !self.form.show_synopsis;
    }

    /// 切换剧透模式
    ///
    /// 开启前必须由 `confirm` 确认，关闭立即生效。返回切换后的状态。
    pub fn set_spoiler_mode(&mut self, enabled: bool, confirm: impl FnOnce() -> bool) -> bool {
        if !enabled {
            self.form.spoiler_mode = false;
        } else if !self.form.spoiler_mode && confirm() {
            self.form.spoiler_mode = true;
        }
        self.form.spoiler_mode
    }

    /// 进入 `Submitting` 并返回待发送的请求
    ///
    /// 标题为空或已有请求在途时返回 `None`，状态不变
    pub fn begin_submit(&mut self) -> Option<ReviewRequestDto> {
        if self.is_loading() || self.form.title.trim().is_empty() {
            return None;
        }

        let request = self.form.to_request();
        self.state = ClientState::Submitting {
            title: self.form.title.trim().to_string(),
            media_type: self.form.media_type,
        };
        Some(request)
    }

    /// 用请求结果结束 `Submitting`；其他状态下调用无效
    pub fn complete(&mut self, outcome: Result<Value, ClientError>) {
        let ClientState::Submitting { title, media_type } = &self.state else {
            return;
        };

        let next = match outcome.and_then(|body| {
            serde_json::from_value::<ReviewResult>(body)
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))
        }) {
            Ok(review) => ClientState::Success(DisplayedReview {
                title: title.clone(),
                media_type: *media_type,
                review,
            }),
            Err(err) => ClientState::Error(err.to_string()),
        };
        self.state = next;
    }

    /// 提交当前表单并等待结果，每次提交只发送一个请求
    pub async fn submit(&mut self) -> &ClientState {
        if let Some(request) = self.begin_submit() {
            debug!(title = ?request.title, mode = ?request.mode, "Submitting review request");
            let outcome = self.transport.send(&request).await;
            self.complete(outcome);
        }
        &self.state
    }

    /// 回到初始状态并清空表单（保留 pro 与剧透开关）
    pub fn reset(&mut self) {
        if self.is_loading() {
            return;
        }
        self.state = ClientState::Idle;
        self.form.title.clear();
        self.form.media_type = MediaType::Manga;
        self.form.show_review = false;
    }
}
