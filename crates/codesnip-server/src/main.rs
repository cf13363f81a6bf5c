use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use codesnip_server::config::{self, ServerConfig};
use codesnip_server::shutdown;
use codesnip_server::state::AppState;
use codesnip_storage::mongo::MongoStore;
use codesnip_storage::repository::SnippetRepository;
use codesnip_storage::store::SnippetStore;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before the subscriber, so RUST_LOG may come from the file.
    let dotenv = config::load_dotenv();

    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();
    dotenv.log();

    let config = ServerConfig::from_env()?;
    tracing::info!(?config, "starting codesnip-server");

    let store = Arc::new(MongoStore::connect(&config.mongodb_uri, &config.database).await?);
    store.ping().await?;

    let state = AppState::new(SnippetRepository::new(store.clone()));
    let app = codesnip_server::router(state, config.request_timeout);

    // A bind failure is logged; the process still releases the store and exits.
    match TcpListener::bind(config.bind_addr).await {
        Ok(listener) => {
            tracing::info!(addr = %config.bind_addr, "listening");
            if let Err(e) = shutdown::serve(
                listener,
                app,
                shutdown::shutdown_signal(),
                config.shutdown_grace,
            )
            .await
            {
                tracing::error!(error = %e, "server stopped with error");
            }
        }
        Err(e) => {
            tracing::error!(addr = %config.bind_addr, error = %e, "listen failed");
        }
    }

    store.disconnect().await?;
    Ok(())
}
