use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle};
use tower_http::services::ServeDir;

mod config;
mod routes;
mod store;

use config::{Config, StoreKind};
use store::TodoStore;

#[tokio::main]
async fn main() -> Result<()> {
    let _logger = init_logging()?;

    let config = Config::from_env()?;
    let store = match &config.store {
        StoreKind::Memory => {
            log::warn!("using in-memory store, todos are lost on restart");
            TodoStore::memory()
        }
        StoreKind::Redis { url } => {
            log::info!("using redis at {}", url);
            TodoStore::redis(url).context("invalid REDIS_URL")?
        }
    };

    let app = routes::router(store).fallback_service(ServeDir::new(&config.static_dir));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    log::info!(
        "server running on http://{} serving {}",
        config.bind_addr,
        config.static_dir
    );
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_logging() -> Result<LoggerHandle> {
    // `TODOS_LOG` wins over `RUST_LOG`.
    let spec = std::env::var("TODOS_LOG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| {
            std::env::var("RUST_LOG")
                .ok()
                .filter(|value| !value.trim().is_empty())
        })
        .unwrap_or_else(|| "info".to_string());

    Ok(Logger::try_with_str(spec)?.log_to_stdout().start()?)
}
