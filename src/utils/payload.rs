use axum::{
  body::Bytes,
  extract::{Form, FromRequest, Request},
  http::{header::CONTENT_TYPE, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::AppError;

pub const NO_INPUT: &str = "No input data provided";

/// Request body accepted either as a JSON object or as a url-encoded form.
///
/// Bodies that are missing, empty, not an object, or sent with any other
/// content type are rejected with `400 No input data provided`.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

/// Like [`Payload`], but an empty object or form is accepted and decodes to
/// a value with every field absent.
#[derive(Debug, Clone)]
pub struct Patch<T>(pub T);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
  Json,
  Form,
}

fn body_kind(headers: &HeaderMap) -> Option<BodyKind> {
  let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
  let mime = content_type.split(';').next()?.trim().to_ascii_lowercase();

  if mime == "application/json" || mime.ends_with("+json") {
    Some(BodyKind::Json)
  } else if mime == "application/x-www-form-urlencoded" {
    Some(BodyKind::Form)
  } else {
    None
  }
}

async fn read_fields<S>(req: Request, state: &S) -> Result<Map<String, Value>, AppError>
where
  S: Send + Sync,
{
  match body_kind(req.headers()) {
    Some(BodyKind::Json) => {
      let bytes = Bytes::from_request(req, state)
        .await
        .map_err(|_| AppError::bad_request("Failed to read request body"))?;
      if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::bad_request(NO_INPUT));
      }
      match serde_json::from_slice::<Value>(&bytes)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::bad_request(NO_INPUT)),
      }
    }
    Some(BodyKind::Form) => {
      let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
        .await
        .map_err(|_| AppError::bad_request("Invalid form data"))?;
      Ok(pairs.into_iter().map(|(k, v)| (k, Value::String(v))).collect())
    }
    None => Err(AppError::bad_request(NO_INPUT)),
  }
}

fn decode<T: DeserializeOwned>(fields: Map<String, Value>) -> Result<T, AppError> {
  serde_json::from_value(Value::Object(fields)).map_err(|e| {
    tracing::debug!("rejected request body: {}", e);
    AppError::bad_request("Invalid input data")
  })
}

impl<S, T> FromRequest<S> for Payload<T>
where
  S: Send + Sync,
  T: DeserializeOwned,
{
  type Rejection = AppError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let fields = read_fields(req, state).await?;
    if fields.is_empty() {
      return Err(AppError::bad_request(NO_INPUT));
    }
    decode(fields).map(Payload)
  }
}

impl<S, T> FromRequest<S> for Patch<T>
where
  S: Send + Sync,
  T: DeserializeOwned,
{
  type Rejection = AppError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let fields = read_fields(req, state).await?;
    decode(fields).map(Patch)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::{body::Body, http::StatusCode};
  use serde::Deserialize;

  #[derive(Debug, Deserialize, PartialEq)]
  struct Contact {
    name: Option<String>,
    email: Option<String>,
  }

  async fn extract(content_type: Option<&str>, body: &'static str) -> Result<Contact, AppError> {
    let mut builder = axum::http::Request::builder().method("POST").uri("/");
    if let Some(content_type) = content_type {
      builder = builder.header(CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body)).expect("build request");
    Payload::<Contact>::from_request(request, &()).await.map(|Payload(p)| p)
  }

  #[tokio::test]
  async fn accepts_json_object() {
    let contact = extract(Some("application/json"), r#"{"name":"Ann","extra":1}"#)
      .await
      .expect("extract");
    assert_eq!(
      contact,
      Contact {
        name: Some("Ann".to_string()),
        email: None
      }
    );
  }

  #[tokio::test]
  async fn accepts_form_with_charset() {
    let contact = extract(
      Some("application/x-www-form-urlencoded; charset=utf-8"),
      "name=Ann&email=ann%40x.com",
    )
    .await
    .expect("extract");
    assert_eq!(contact.email.as_deref(), Some("ann@x.com"));
  }

  #[tokio::test]
  async fn rejects_missing_or_empty_input() {
    for (content_type, body) in [
      (Some("application/json"), ""),
      (Some("application/json"), "{}"),
      (Some("application/json"), "null"),
      (Some("application/json"), "[1, 2]"),
      (Some("application/x-www-form-urlencoded"), ""),
      (Some("text/plain"), "name=Ann"),
      (None, r#"{"name":"Ann"}"#),
    ] {
      let err = extract(content_type, body).await.unwrap_err();
      assert_eq!(err.status_code, StatusCode::BAD_REQUEST);
      assert_eq!(err.message, NO_INPUT, "content type {:?} body {:?}", content_type, body);
    }
  }

  #[tokio::test]
  async fn rejects_malformed_json() {
    let err = extract(Some("application/json"), "{\"name\":").await.unwrap_err();
    assert_eq!(err.message, "Invalid JSON format");
  }

  #[tokio::test]
  async fn rejects_wrongly_typed_field() {
    let err = extract(Some("application/json"), r#"{"name": 5}"#).await.unwrap_err();
    assert_eq!(err.status_code, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "Invalid input data");
  }

  #[tokio::test]
  async fn patch_accepts_empty_object_and_form() {
    for (content_type, body) in [
      ("application/json", "{}"),
      ("application/x-www-form-urlencoded", ""),
    ] {
      let request = axum::http::Request::builder()
        .method("PUT")
        .uri("/")
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .expect("build request");
      let Patch(contact) = Patch::<Contact>::from_request(request, &()).await.expect("extract");
      assert_eq!(contact, Contact { name: None, email: None });
    }
  }

  #[tokio::test]
  async fn patch_still_rejects_missing_body() {
    let request = axum::http::Request::builder()
      .method("PUT")
      .uri("/")
      .body(Body::empty())
      .expect("build request");
    let err = Patch::<Contact>::from_request(request, &()).await.unwrap_err();
    assert_eq!(err.message, NO_INPUT);
  }
}
