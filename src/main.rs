use std::sync::Arc;

use todo_api_rust::config::AppConfig;
use todo_api_rust::database::store::TodoStore;
use todo_api_rust::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and JWT_SECRET
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    if config.uses_default_secret() {
        tracing::warn!("JWT_SECRET not set; using the insecure development key");
    }

    let store = TodoStore::connect(&config.database.connection_string).await?;

    // Schema creation failures are logged, not fatal: the table may already
    // exist with a shape the IF NOT EXISTS guard cannot see.
    if let Err(e) = store.init_schema().await {
        tracing::error!("schema initialization failed: {}", e);
    }

    let state = AppState {
        config: Arc::new(config),
        store: Arc::new(store),
    };

    let bind_addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("todo-api listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
