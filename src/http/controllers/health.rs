use actix_web::HttpResponse;
use serde_json::json;

/// Shallow liveness check. It does not touch the database so it
/// keeps answering even if the storage is down.
#[tracing::instrument]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "healthy" }))
}
