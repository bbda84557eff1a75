use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use student_shared::config::{Config, StoreBackend};
use student_shared::store::{DynamoStudentStore, MemoryStudentStore, StudentStore};
use student_shared::AppState;
use tracing_subscriber::EnvFilter;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    let config = Config::from_env()?;

    // Initialize the store once at startup
    let store: Box<dyn StudentStore> = match config.backend {
        StoreBackend::DynamoDb => {
            let sdk_config = aws_config::load_from_env().await;
            let client = match &config.dynamodb_endpoint {
                Some(endpoint) => {
                    let dynamo_config = aws_sdk_dynamodb::config::Builder::from(&sdk_config)
                        .endpoint_url(endpoint)
                        .build();
                    DynamoClient::from_conf(dynamo_config)
                }
                None => DynamoClient::new(&sdk_config),
            };
            Box::new(DynamoStudentStore::new(client, config.table_name.clone()))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory student store; records do not outlive this process");
            Box::new(MemoryStudentStore::new())
        }
    };
    tracing::info!(
        "Student API starting - Table: {} Backend: {:?}",
        config.table_name,
        config.backend
    );

    let state = AppState::new(store);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event.payload, state).await }
    }))
    .await
}
