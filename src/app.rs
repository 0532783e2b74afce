use axum::{
  http::{header::LOCATION, Request, Response, StatusCode},
  response::IntoResponse,
  routing::get,
  Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
  domains::{document::rest::document_routes, user::rest::user_routes},
  state::SharedAppState,
};

pub const API_DOCS_PATH: &str = "/apidocs/";

pub fn create_app(state: SharedAppState) -> Router {
  Router::new()
    .route("/", get(root_handler))
    .merge(user_routes())
    .merge(document_routes())
    .with_state(state)
    .layer(CorsLayer::permissive())
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(|req: &Request<_>| {
          tracing::info_span!("http_request", method = %req.method(), uri = %req.uri(), status = tracing::field::Empty)
        })
        .on_response(|res: &Response<_>, latency: std::time::Duration, span: &tracing::Span| {
          let status = res.status();
          span.record("status", tracing::field::display(status));
          if status.is_server_error() {
            tracing::error!(%status, ?latency, "response");
          } else {
            tracing::info!(%status, ?latency, "response");
          }
        }),
    )
}

pub async fn root_handler() -> impl IntoResponse {
  (StatusCode::FOUND, [(LOCATION, API_DOCS_PATH)])
}
