use std::{sync::Arc, time::Duration};

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use mirror_mirror::{AppState, cache::QueryCache, config::Config, disney::DisneyClient, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,mirror_mirror=debug".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent("mirror-mirror/0.1")
        .timeout(Duration::from_secs(30))
        .build()?;

    let disney = DisneyClient::new(http, config.disney_base_url.clone(), config.disney_rps);
    let cache = QueryCache::new(Arc::new(disney), config.cache_max_entries);

    let state = Arc::new(AppState { config: config.clone(), cache });

    let app = router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
