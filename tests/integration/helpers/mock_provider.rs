// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use nobix::domain::services::llm_service::{Completion, CompletionProvider, CompletionRequest};
use nobix::utils::errors::ReviewError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

type Responder = Box<dyn Fn(&CompletionRequest) -> Result<Completion, ReviewError> + Send + Sync>;

/// 记录调用的补全提供者
pub struct MockCompletionProvider {
    responder: Responder,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionProvider {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&CompletionRequest) -> Result<Completion, ReviewError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 总是返回给定内容与元数据引用
    pub fn returning(content: String, citations: Vec<String>) -> Self {
        Self::new(move |_| {
            Ok(Completion {
                content: Some(content.clone()),
                citations: citations.clone(),
                ..Completion::default()
            })
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ReviewError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(request)
    }
}
