use axum::{response::Json as JsonResponse, routing::get, Router};

use super::model::Document;
use crate::state::SharedAppState;

pub fn document_routes() -> Router<SharedAppState> {
  Router::new().route("/documents", get(get_documents_handler))
}

pub async fn get_documents_handler() -> JsonResponse<Vec<Document>> {
  JsonResponse(Document::samples())
}
