use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use cars_api_rust::{
    config::{Config, StoreBackend},
    constants::API_NAME,
    handlers,
    repository::{CarStore, DynamoCarStore, MemoryCarStore},
    service::CarService,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("{} Starting Cars API server on port {}", API_NAME, config.server_port);

    let store = build_store(&config).await?;
    let app = handlers::app(CarService::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn CarStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("{} Using in-memory store; data is lost on exit", API_NAME);
            Ok(Arc::new(MemoryCarStore::new()))
        }
        StoreBackend::DynamoDb => {
            let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
            if let Some(endpoint) = &config.dynamodb_endpoint {
                tracing::info!("{} Using DynamoDB endpoint {}", API_NAME, endpoint);
                builder = builder.endpoint_url(endpoint);
            }
            let client = aws_sdk_dynamodb::Client::from_conf(builder.build());

            tracing::info!("{} Using DynamoDB table {}", API_NAME, config.table_name);
            Ok(Arc::new(DynamoCarStore::new(client, &config.table_name)))
        }
    }
}
