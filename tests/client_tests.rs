//! End-to-end client behavior against a mock backend.

mod common;

use serde_json::json;
use slicingdice::client::{
    AggregationQuery, ColumnDefinition, ColumnSelection, ColumnType, CountQuery, DataExtractionQuery, InsertPayload,
    SavedQuery, SavedQueryType, TopValuesQuery, TopValuesRequest,
};
use slicingdice::client::types::AUTO_CREATE_KEY;
use slicingdice::{AuthLevel, Credentials, Error, ServiceErrorKind, SlicingDice};

use common::{start_hanging_backend, start_mock_backend, start_programmable_backend};

const OK: &str = r#"{"status":"ok"}"#;

fn adults() -> Vec<CountQuery> {
    vec![CountQuery::new("adults", vec![json!({"age": {"gte": 18}})])]
}

#[tokio::test]
async fn test_create_column_with_write_key() {
    let backend = start_mock_backend(200, OK).await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_write_key("write-123"))).unwrap();

    let response = client
        .create_column(ColumnDefinition::new("Age", ColumnType::Integer))
        .await
        .unwrap();

    assert_eq!(response, json!({"status": "ok"}));
    assert_eq!(client.status_code(), Some(200));
    let headers = client.headers().unwrap();
    assert_eq!(headers.get("x-request-id").map(String::as_str), Some("mock-1"));

    let request = backend.last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/column/");
    assert_eq!(request.header("authorization"), Some("write-123"));
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.json(), json!({"name": "Age", "type": "integer"}));
}

#[tokio::test]
async fn test_empty_insert_never_reaches_network() {
    let backend = start_mock_backend(200, OK).await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_write_key("w"))).unwrap();

    let err = client.insert(&InsertPayload::new()).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(backend.hits(), 0);
    assert_eq!(client.status_code(), None);
}

#[tokio::test]
async fn test_missing_keys_fail_without_request() {
    let backend = start_mock_backend(200, OK).await;
    let err = SlicingDice::from_config(backend.config(Credentials::default().with_read_key(""))).unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials(_)));
    assert_eq!(backend.hits(), 0);
}

#[tokio::test]
async fn test_error_code_inside_success_status() {
    let backend = start_mock_backend(200, r#"{"code": 42, "message": "Field integer values exception"}"#).await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_write_key("w"))).unwrap();

    let payload = InsertPayload::new().with("user1", "age", "old");
    let err = client.insert(&payload).await.unwrap_err();
    match err {
        Error::Service { kind, code, status, message } => {
            assert_eq!(kind, ServiceErrorKind::FieldIntegerValues);
            assert_eq!(code, 42);
            assert_eq!(status, 200);
            assert_eq!(message, "Field integer values exception");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(backend.hits(), 1);
    assert_eq!(client.status_code(), None);
}

#[tokio::test]
async fn test_errors_array_is_mapped() {
    let backend = start_mock_backend(400, r#"{"errors": [{"code": 23, "message": "slow down"}]}"#).await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_read_key("r"))).unwrap();

    let err = client.count_entity(&adults()).await.unwrap_err();
    assert_eq!(err.service_kind(), Some(ServiceErrorKind::RequestRateLimit));
}

#[tokio::test]
async fn test_read_key_cannot_write() {
    let backend = start_mock_backend(200, OK).await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_read_key("r"))).unwrap();

    let err = client
        .create_column(ColumnDefinition::new("Age", ColumnType::Integer))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientPermission {
            required: AuthLevel::Write,
            actual: AuthLevel::Read
        }
    ));
    assert_eq!(backend.hits(), 0);
}

#[tokio::test]
async fn test_write_key_cannot_read() {
    let backend = start_mock_backend(200, OK).await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_write_key("w"))).unwrap();

    let err = client.count_entity(&adults()).await.unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientPermission {
            required: AuthLevel::Read,
            actual: AuthLevel::Write
        }
    ));
    assert_eq!(backend.hits(), 0);
}

#[tokio::test]
async fn test_custom_key_reaches_every_level() {
    let backend = start_mock_backend(200, OK).await;
    let client = SlicingDice::from_config(
        backend.config(Credentials::default().with_custom_key("custom").with_read_key("r")),
    )
    .unwrap();

    client.count_entity(&adults()).await.unwrap();
    client.get_columns().await.unwrap();
    client.insert(&InsertPayload::new().with("u1", "age", 3)).await.unwrap();

    assert_eq!(backend.hits(), 3);
    assert!(backend.requests().iter().all(|r| r.header("authorization") == Some("custom")));
}

#[tokio::test]
async fn test_saved_query_crud_methods() {
    let backend = start_mock_backend(200, OK).await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_master_key("m"))).unwrap();
    let saved = SavedQuery::new("adults", SavedQueryType::CountEntity, vec![json!({"age": {"gte": 18}})]);

    client.create_saved_query(&saved).await.unwrap();
    client.get_saved_query("adults").await.unwrap();
    client.get_saved_queries().await.unwrap();
    client.update_saved_query("adults", &saved.clone().with_cache_period(100)).await.unwrap();
    client.delete_saved_query("adults").await.unwrap();

    let calls: Vec<(String, String)> = backend
        .requests()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    assert_eq!(
        calls,
        [
            ("POST".to_string(), "/query/saved/".to_string()),
            ("GET".to_string(), "/query/saved/adults".to_string()),
            ("GET".to_string(), "/query/saved/".to_string()),
            ("PUT".to_string(), "/query/saved/adults".to_string()),
            ("DELETE".to_string(), "/query/saved/adults".to_string()),
        ]
    );
    let update = &backend.requests()[3];
    assert_eq!(update.json()["cache-period"], 100);
    assert_eq!(update.json()["type"], "count/entity");
}

#[tokio::test]
async fn test_non_success_status_without_code() {
    let backend = start_mock_backend(500, r#"{"status":"error"}"#).await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_master_key("m"))).unwrap();
    assert!(matches!(client.get_database().await, Err(Error::Http(500))));
    assert_eq!(client.status_code(), None);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let backend = start_mock_backend(200, "<html>oops</html>").await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_master_key("m"))).unwrap();
    assert!(matches!(client.get_columns().await, Err(Error::Decode(_))));
}

#[tokio::test]
async fn test_empty_body_is_transport_error() {
    let backend = start_mock_backend(200, "").await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_master_key("m"))).unwrap();
    assert!(matches!(client.get_columns().await, Err(Error::Transport(_))));
}

#[tokio::test]
async fn test_sandbox_prefix() {
    let backend = start_mock_backend(200, OK).await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_master_key("m")))
        .unwrap()
        .with_test_endpoint(true);

    client.get_columns().await.unwrap();
    client.count_entity_total(&["users".to_string()]).await.unwrap();
    client.get_database().await.unwrap();

    let paths: Vec<String> = backend.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, ["/test/column/", "/test/query/count/entity/total/", "/database/"]);
    assert_eq!(backend.requests()[1].json(), json!({"tables": ["users"]}));
}

#[tokio::test]
async fn test_query_family_endpoints_and_bodies() {
    let backend =
        start_programmable_backend(|request| (200, json!({"status": "ok", "path": request.path}).to_string())).await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_read_key("r"))).unwrap();

    let filter = vec![json!({"age": {"gte": 18}})];

    let response = client.count_event(&adults()).await.unwrap();
    assert_eq!(response["path"], "/query/count/event/");

    client
        .aggregation(&AggregationQuery {
            query: vec![json!({"city": 3})],
            filter: None,
        })
        .await
        .unwrap();

    let mut top = TopValuesRequest::new();
    top.insert("cities".into(), TopValuesQuery::new("city").with_param("quantity", 5));
    client.top_values(&top).await.unwrap();

    client
        .exists_entity(&["u1".to_string(), "u2".to_string()], Some("users"))
        .await
        .unwrap();

    let extraction = DataExtractionQuery::new(filter.clone())
        .with_columns(ColumnSelection::all())
        .with_limit(10);
    client.result(&extraction).await.unwrap();
    client.score(&DataExtractionQuery::new(filter)).await.unwrap();

    let requests = backend.requests();
    let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "/query/count/event/",
            "/query/aggregation/",
            "/query/top_values/",
            "/query/exists/entity/",
            "/data_extraction/result/",
            "/data_extraction/score/",
        ]
    );
    assert!(requests.iter().all(|r| r.method == "POST"));
    assert_eq!(requests[2].json(), json!({"cities": {"column": "city", "quantity": 5}}));
    assert_eq!(requests[3].json(), json!({"ids": ["u1", "u2"], "table": "users"}));
    assert_eq!(requests[4].json()["columns"], "all");
    assert_eq!(requests[4].json()["limit"], 10);
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let addr = start_hanging_backend().await;
    let mut config = slicingdice::ClientConfig::default()
        .with_base_url(format!("http://{}", addr))
        .with_keys(Credentials::default().with_master_key("m"));
    config.timeout_secs = 1;
    config.use_system_proxy = false;
    let client = SlicingDice::from_config(config).unwrap();

    match client.get_database().await {
        Err(Error::Transport(message)) => assert!(message.contains("timed out")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_count_entity_total_always_sends_tables() {
    let backend = start_mock_backend(200, OK).await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_read_key("r"))).unwrap();

    client.count_entity_total(&[]).await.unwrap();
    assert_eq!(backend.last_request().json(), json!({"tables": []}));
}

#[tokio::test]
async fn test_create_top_values_saved_query() {
    let backend = start_mock_backend(200, OK).await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_master_key("m"))).unwrap();

    let mut request = TopValuesRequest::new();
    request.insert("cities".into(), TopValuesQuery::new("city").with_param("quantity", 3));
    let saved = SavedQuery::new("top-cities", SavedQueryType::TopValues, request);
    client.create_saved_query(&saved).await.unwrap();

    let sent = backend.last_request();
    assert_eq!(sent.path, "/query/saved/");
    assert_eq!(
        sent.json(),
        json!({
            "name": "top-cities",
            "type": "top_values",
            "query": {"cities": {"column": "city", "quantity": 3}}
        })
    );
}

#[tokio::test]
async fn test_reserved_entity_id_never_reaches_network() {
    let backend = start_mock_backend(200, OK).await;
    let client = SlicingDice::from_config(backend.config(Credentials::default().with_write_key("w"))).unwrap();

    let payload = InsertPayload::new().with(AUTO_CREATE_KEY, "age", 3);
    assert!(matches!(client.insert(&payload).await, Err(Error::Validation(_))));
    assert_eq!(backend.hits(), 0);
}

#[derive(Clone, Default)]
struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[tokio::test]
async fn test_failures_are_returned_not_logged() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer({
            let logs = logs.clone();
            move || logs.clone()
        })
        .finish();
    let _default = tracing::subscriber::set_default(subscriber);

    let backend = start_mock_backend(200, r#"{"code": 42, "message": "Field integer values exception"}"#).await;
    let config = backend.config(Credentials::default().with_write_key("secret-write"));
    let client = SlicingDice::from_config(config).unwrap();
    let err = client.insert(&InsertPayload::new().with("u1", "age", "x")).await.unwrap_err();
    assert_eq!(err.service_kind(), Some(ServiceErrorKind::FieldIntegerValues));

    let text = logs.text();
    assert!(text.contains("Response received"), "{}", text);
    assert!(!text.contains("Field integer values exception"), "{}", text);
    assert!(!text.contains("secret-write"), "{}", text);
}
