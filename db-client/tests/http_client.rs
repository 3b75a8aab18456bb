//! Integration tests for the HTTP client.
//!
//! These tests spawn a stub database viewer service and drive the real
//! reqwest client against it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use common::errors::AppError;
use common::models::UploadFile;
use db_client::{DatabaseApi, HttpDatabaseClient};

#[derive(Default)]
struct Stub {
    databases: Mutex<Vec<String>>,
    uploads: Mutex<Vec<(String, String, usize)>>,
    request_ids: Mutex<Vec<String>>,
}

type Shared = Arc<Stub>;

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "status": status.as_u16(), "sub_code": 1, "message": message })),
    )
        .into_response()
}

fn record_request_id(stub: &Stub, headers: &HeaderMap) {
    if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        stub.request_ids.lock().unwrap().push(id.to_string());
    }
}

async fn list_databases(State(stub): State<Shared>, headers: HeaderMap) -> Response {
    record_request_id(&stub, &headers);
    let databases = stub.databases.lock().unwrap().clone();
    Json(json!({ "databases": databases })).into_response()
}

async fn upload_database(State(stub): State<Shared>, mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map(|b| b.len()).unwrap_or(0);
        stub.uploads
            .lock()
            .unwrap()
            .push((name.clone(), file_name.clone(), bytes));
        if name != "db" {
            continue;
        }
        let databases = {
            let mut databases = stub.databases.lock().unwrap();
            if databases.contains(&file_name) {
                None
            } else {
                databases.push(file_name);
                Some(databases.clone())
            }
        };
        return match databases {
            Some(databases) => Json(json!({ "databases": databases })).into_response(),
            None => error(StatusCode::BAD_REQUEST, "database filename already exists"),
        };
    }
    error(StatusCode::BAD_REQUEST, "missing db field")
}

async fn list_tables(State(stub): State<Shared>, Path(db): Path<String>) -> Response {
    if !stub.databases.lock().unwrap().contains(&db) {
        return error(StatusCode::BAD_REQUEST, "database does not exist");
    }
    Json(json!({ "tables": ["customers", "orders"] })).into_response()
}

async fn list_columns(Path((db, table)): Path<(String, String)>) -> Response {
    Json(json!({ "columns": [format!("{db}.{table}.id"), "amount"] })).into_response()
}

async fn column_data(Path((_db, _table, column)): Path<(String, String, String)>) -> Response {
    if column == "missing" {
        return error(StatusCode::NOT_FOUND, "not found");
    }
    Json(json!({
        "values": { "index": ["10", "20"], "data": [[2, 31.5], [1, null]] },
        "values_length": 2,
        "rows_length": 3,
        "missing_rows": 0
    }))
    .into_response()
}

async fn broken() -> &'static str {
    "this is not json"
}

async fn spawn_stub(databases: &[&str]) -> (String, Shared, tokio::task::JoinHandle<()>) {
    let stub: Shared = Arc::new(Stub::default());
    stub.databases
        .lock()
        .unwrap()
        .extend(databases.iter().map(|d| d.to_string()));

    let app = Router::new()
        .route("/database/", get(list_databases).post(upload_database))
        .route("/database/{db}/", get(list_tables))
        .route("/database/{db}/{table}/", get(list_columns))
        .route("/database/{db}/{table}/{column}/", get(column_data))
        .route("/broken/database/", get(broken))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start
    tokio::time::sleep(Duration::from_millis(10)).await;

    (format!("http://{addr}"), stub, handle)
}

fn client(base_url: &str) -> HttpDatabaseClient {
    HttpDatabaseClient::new(base_url, reqwest::Client::new()).unwrap()
}

#[tokio::test]
async fn lists_databases_with_request_id() {
    let (base_url, stub, handle) = spawn_stub(&["sales.db", "people.csv"]).await;

    let databases = client(&base_url).list_databases().await.unwrap();
    assert_eq!(databases, vec!["sales.db", "people.csv"]);

    let ids = stub.request_ids.lock().unwrap().clone();
    assert_eq!(ids.len(), 1);
    assert_eq!(ids[0].len(), 36);

    handle.abort();
}

#[tokio::test]
async fn upload_sends_single_db_field() {
    let (base_url, stub, handle) = spawn_stub(&["sales.db"]).await;

    let file = UploadFile::new("people.csv", b"id,age\n1,30\n".to_vec());
    let databases = client(&base_url).upload_database(file).await.unwrap();
    assert_eq!(databases, vec!["sales.db", "people.csv"]);

    let uploads = stub.uploads.lock().unwrap().clone();
    assert_eq!(uploads, vec![("db".to_string(), "people.csv".to_string(), 12)]);

    handle.abort();
}

#[tokio::test]
async fn upload_conflict_surfaces_message() {
    let (base_url, _stub, handle) = spawn_stub(&["sales.db"]).await;

    let err = client(&base_url)
        .upload_database(UploadFile::new("sales.db", b"x".to_vec()))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AppError::Remote {
            status: 400,
            message: "database filename already exists".to_string()
        }
    );

    handle.abort();
}

#[tokio::test]
async fn lists_tables_and_columns() {
    let (base_url, _stub, handle) = spawn_stub(&["sales.db"]).await;
    let c = client(&base_url);

    assert_eq!(c.list_tables("sales.db").await.unwrap(), vec!["customers", "orders"]);
    assert_eq!(
        c.list_columns("sales.db", "orders").await.unwrap(),
        vec!["sales.db.orders.id", "amount"]
    );

    handle.abort();
}

#[tokio::test]
async fn unknown_database_is_remote_error() {
    let (base_url, _stub, handle) = spawn_stub(&[]).await;

    let err = client(&base_url).list_tables("nope.db").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), "database does not exist");

    handle.abort();
}

#[tokio::test]
async fn column_data_decodes_nested_shape() {
    let (base_url, _stub, handle) = spawn_stub(&["sales.db"]).await;

    let summary = client(&base_url)
        .column_data("sales.db", "orders", "amount")
        .await
        .unwrap();
    assert_eq!(summary.index, Some(vec![json!("10"), json!("20")]));
    assert_eq!(summary.values, vec![json!([2, 31.5]), json!([1, null])]);
    assert_eq!(summary.values_length, 2);
    assert_eq!(summary.rows_length, 3);
    assert_eq!(summary.missing_rows, 0);

    handle.abort();
}

#[tokio::test]
async fn column_data_not_found() {
    let (base_url, _stub, handle) = spawn_stub(&["sales.db"]).await;

    let err = client(&base_url)
        .column_data("sales.db", "orders", "missing")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AppError::Remote {
            status: 404,
            message: "not found".to_string()
        }
    );

    handle.abort();
}

#[tokio::test]
async fn non_json_success_is_invalid_response() {
    let (base_url, _stub, handle) = spawn_stub(&[]).await;

    let err = client(&format!("{base_url}/broken"))
        .list_databases()
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidResponse(_)), "{err:?}");

    handle.abort();
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .list_databases()
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Transport(_)), "{err:?}");
}
