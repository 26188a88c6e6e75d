mod blueprints;

use utoipa::OpenApi;

use crate::routes::util::json_error_handler;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blueprints API",
        description = "Authored point blueprints with a configurable read filter."
    ),
    paths(
        blueprints::list_blueprints,
        blueprints::list_author_blueprints,
        blueprints::get_blueprint,
        blueprints::create_blueprint,
        blueprints::add_point,
    ),
    tags((name = "blueprints", description = "Create, read and extend blueprints"))
)]
pub struct ApiDoc;

pub fn config(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        actix_web::web::scope("/v1")
            .app_data(actix_web::web::JsonConfig::default().error_handler(json_error_handler))
            .configure(blueprints::config),
    );
}
