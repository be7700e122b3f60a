//! Create a column, insert a value and count it against the sandbox.
//!
//! Run with `SD_MASTER_KEY=... cargo run --example basic`.

use serde_json::json;
use slicingdice::client::{ColumnDefinition, ColumnType, CountQuery, InsertPayload};
use slicingdice::config::loader;
use slicingdice::observability::logging::{init_logging, DEFAULT_FILTER};
use slicingdice::SlicingDice;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(DEFAULT_FILTER)?;

    let config = loader::from_env()?.with_test_endpoint(true);
    let client = SlicingDice::from_config(config)?;
    tracing::info!(key_kind = ?client.key_resolver().kind(), "Client ready");

    let column = ColumnDefinition::new("Age", ColumnType::Integer).with_api_name("age");
    let created = client.create_column(column).await?;
    tracing::info!(response = %created, "Column created");

    let payload = InsertPayload::new().with("user1@example.com", "age", 31);
    let inserted = client.insert(&payload).await?;
    tracing::info!(response = %inserted, status = ?client.status_code(), "Inserted");

    let count = client
        .count_entity(&[CountQuery::new("adults", vec![json!({"age": {"gte": 18}})])])
        .await?;
    tracing::info!(response = %count, "Counted");

    Ok(())
}
