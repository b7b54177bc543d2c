// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use nobix::config::settings::Settings;
use nobix::domain::services::llm_service::LLMService;
use nobix::domain::services::review_service::ReviewService;
use nobix::infrastructure::metrics;
use nobix::presentation::routes;
use nobix::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Arc::new(Settings::new()?);

    // 2. Initialize logging
    telemetry::init_telemetry(settings.telemetry.json);
    info!("Starting nobix...");

    if settings.metrics.enabled {
        metrics::init_metrics(&settings.metrics);
    }

    // 3. Initialize the LLM provider and review service
    if settings.llm.api_key.is_none() {
        warn!("No LLM API key configured; set NOBIX__LLM__API_KEY or PERPLEXITY_API_KEY");
    }
    let llm = LLMService::new(&settings.llm)?;
    let service = Arc::new(ReviewService::new(Arc::new(llm)));
    info!(
        model = %settings.llm.model,
        base_url = %settings.llm.api_base_url,
        "Review service initialized"
    );

    // 4. Start HTTP server
    let app = routes::routes(service);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
