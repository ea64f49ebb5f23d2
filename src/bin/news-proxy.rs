use news_search::config::ProxyConfig;
use news_search::proxy::{self, ProxyState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ProxyConfig::from_env()?;
    info!("Starting news proxy");
    info!("Upstream URL: {}", config.upstream_url);

    let state = Arc::new(ProxyState::from_config(&config)?);
    let app = proxy::router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("News proxy listening on http://{}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
