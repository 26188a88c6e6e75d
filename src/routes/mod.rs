pub mod util;
pub mod v1;

use actix_web::{get, HttpResponse};
use utoipa::OpenApi;

pub fn config(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        actix_web::web::scope("/api")
            .service(openapi_json)
            .configure(v1::config),
    );
}

/// Serves the OpenAPI document describing the v1 routes.
#[get("/openapi.json")]
async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(v1::ApiDoc::openapi())
}
