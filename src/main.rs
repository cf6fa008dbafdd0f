//! Storyloom - 交互式小说 AI 后端
//!
//! - Domain: story/, branch/, prompt, parser
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, adapters

use std::sync::Arc;

use storyloom::config::{load_config, print_config};
use storyloom::infrastructure::adapters::{
    GeminiClient, GeminiClientConfig, HttpTranscriber, HttpTranscriberConfig,
};
use storyloom::infrastructure::http::{AppState, HttpServer, ServerConfig};
use storyloom::infrastructure::memory::{InMemoryBranchRegistry, InMemoryStoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},storyloom={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Storyloom - 交互式小说 AI 后端");
    print_config(&config);

    // 文本模型
    let llm_config = GeminiClientConfig::new(config.llm.api_key.clone())
        .with_base_url(config.llm.base_url.clone())
        .with_model(config.llm.model.clone())
        .with_timeout(config.llm.timeout_secs);
    let text_generator = Arc::new(GeminiClient::new(llm_config)?);

    // 语音转写
    let transcriber = Arc::new(HttpTranscriber::new(HttpTranscriberConfig {
        url: config.speech.url.clone(),
        api_key: config.speech.api_key.clone(),
        model: config.speech.model.clone(),
        language: config.speech.language.clone(),
        timeout_secs: config.speech.timeout_secs,
    })?);

    // 进程内存储，重启即清空
    let story_store = Arc::new(InMemoryStoryStore::new());
    let branch_registry = Arc::new(InMemoryBranchRegistry::new());

    let state = AppState::new(text_generator, story_store, branch_registry, transcriber);
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
