use rmcp::ServiceExt;
use searxng_mcp::{ServerConfig, SearxngMcpService};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    // stdout carries the MCP transport, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting SearXNG MCP server");
    tracing::info!("  SearXNG URL: {}", config.base_url);
    tracing::info!("  Request timeout: {}s", config.timeout_secs);
    tracing::info!("  Max results limit: {}", config.max_results_limit);

    let service = SearxngMcpService::new(config)?;
    let running = service
        .serve((tokio::io::stdin(), tokio::io::stdout()))
        .await?;

    running.waiting().await?;

    tracing::info!("SearXNG MCP server shut down");
    Ok(())
}
