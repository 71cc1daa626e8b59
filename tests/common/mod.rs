#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use carcrate::entity::car::{self, CarInput};
use carcrate::migration::Migrator;
use carcrate::routes;
use carcrate::service::CarService;
use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    routes::router(db)
}

pub async fn insert_car(
    db: &DatabaseConnection,
    make: Option<&str>,
    model: Option<&str>,
    price: Option<f64>,
) -> car::Model {
    CarService::create(
        db,
        CarInput {
            id: None,
            make: make.map(str::to_string),
            model: model.map(str::to_string),
            price,
        },
    )
    .await
    .expect("insert car")
}

/// Issue a request and return status, headers and the parsed JSON body
/// (`Value::Null` for an empty body).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, headers, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: &Value) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Ids of the cars in a list response body.
pub fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("list body is an array")
        .iter()
        .map(|car| car["id"].as_i64().expect("car has an id"))
        .collect()
}
