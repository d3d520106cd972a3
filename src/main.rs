//! order-desk: order entry and dashboard service
//!
//! Resolves the connection string, ensures the `orders` table, then serves
//! the REST surface until Ctrl+C / SIGTERM.

use order_desk::config::{DatabaseConfig, ServerConfig, YamlSecretStore};
use order_desk::server::ServerBuilder;
use order_desk::storage::PostgresOrderStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_desk=info,tower_http=info".into()),
        )
        .init();

    let server_config = ServerConfig::from_env()?;
    let secrets = YamlSecretStore::from_yaml_file(&server_config.secrets_path)?;
    let database = Arc::new(DatabaseConfig::resolve(&secrets));

    match database.source() {
        Some(source) => tracing::info!(?source, "Database connection string resolved"),
        None => tracing::warn!("No database connection string found"),
    }

    ServerBuilder::new()
        .with_store(PostgresOrderStore::new(database))
        .serve(server_config.bind_addr)
        .await
}
