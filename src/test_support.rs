use axum::{
  body::{Body, Bytes},
  http::{Request, StatusCode},
  Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tower::ServiceExt;

use crate::{app::create_app, config::DEFAULT_DATABASE_URL, db, state::SharedAppState};

/// Fresh, migrated in-memory database. Every call yields an isolated store.
pub async fn test_pool() -> SqlitePool {
  let pool = db::pool::connect(DEFAULT_DATABASE_URL, 1)
    .await
    .expect("create in-memory pool");
  db::migrate(&pool).await.expect("run migrations");
  pool
}

pub fn app_with_pool(pool: SqlitePool) -> Router {
  let state = SharedAppState::new(pool);
  create_app(state)
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Bytes) {
  let response = app.oneshot(request).await.expect("handle request");
  let status = response.status();
  let body = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .expect("read response body");
  (status, body)
}

fn json_request<T: Serialize>(method: &str, uri: &str, body: &T) -> Request<Body> {
  Request::builder()
    .method(method)
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(serde_json::to_vec(body).expect("serialize request body")))
    .expect("build request")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
  Request::builder()
    .method(method)
    .uri(uri)
    .body(Body::empty())
    .expect("build request")
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
  send(app, empty_request("GET", uri)).await
}

pub async fn delete(app: Router, uri: &str) -> (StatusCode, Bytes) {
  send(app, empty_request("DELETE", uri)).await
}

pub async fn post_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  send(app, json_request("POST", uri, body)).await
}

pub async fn put_json<T: Serialize>(app: Router, uri: &str, body: &T) -> (StatusCode, Bytes) {
  send(app, json_request("PUT", uri, body)).await
}

pub async fn post_form(app: Router, uri: &str, body: &'static str) -> (StatusCode, Bytes) {
  let request = Request::builder()
    .method("POST")
    .uri(uri)
    .header("content-type", "application/x-www-form-urlencoded")
    .body(Body::from(body))
    .expect("build request");
  send(app, request).await
}
