use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};

use crate::http::Error;
use crate::types;

pub mod health;
pub mod users;

/// Largest accepted JSON request body.
const JSON_BODY_LIMIT: usize = 16_384;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(json_error_handler),
    )
    .service(
        web::resource("/health")
            .route(web::get().to(health::health))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/users")
            .route(web::get().to(users::list))
            .route(web::post().to(users::create))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/users/{id}")
            .route(web::get().to(users::get))
            .default_service(web::route().to(method_not_allowed)),
    )
    .default_service(web::route().to(not_found));
}

fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::from(error).into()
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(types::Error::MethodNotAllowed)
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(types::Error::RouteNotFound)
}
