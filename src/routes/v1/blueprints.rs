use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{
    models::{Blueprint, Point},
    routes::util::{accepted, created, ok, ApiResponse},
    services::BlueprintsService,
    util::Result,
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(list_blueprints)
        .service(list_author_blueprints)
        .service(get_blueprint)
        .service(create_blueprint)
        .service(add_point);
}

fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Validate)]
pub struct NewBlueprint {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "author must not be blank"))]
    author: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "name must not be blank"))]
    name: String,
    #[serde(default)]
    points: Vec<Point>,
}

impl From<NewBlueprint> for Blueprint {
    fn from(value: NewBlueprint) -> Self {
        Blueprint::new(value.author, value.name, value.points)
    }
}

/// Get all blueprints
///
/// Returns the complete list of blueprints stored in the system.
#[utoipa::path(
    get,
    path = "/api/v1/blueprints",
    tag = "blueprints",
    responses(
        (status = 200, description = "Blueprints retrieved successfully", body = ApiResponse<Vec<Blueprint>>),
    )
)]
#[get("/blueprints")]
pub async fn list_blueprints(service: web::Data<BlueprintsService>) -> Result<HttpResponse> {
    let blueprints = service.get_all_blueprints().await?;
    Ok(ok(blueprints))
}

/// Get blueprints by author
///
/// Returns all blueprints belonging to the specified author.
#[utoipa::path(
    get,
    path = "/api/v1/blueprints/{author}",
    tag = "blueprints",
    params(("author" = String, Path, description = "Blueprint author")),
    responses(
        (status = 200, description = "Blueprints retrieved successfully", body = ApiResponse<Vec<Blueprint>>),
        (status = 404, description = "No blueprints found for the given author", body = ApiResponse<String>),
    )
)]
#[get("/blueprints/{author}")]
pub async fn list_author_blueprints(
    service: web::Data<BlueprintsService>,
    author: web::Path<String>,
) -> Result<HttpResponse> {
    let blueprints = service.get_blueprints_by_author(&author).await?;
    Ok(ok(blueprints))
}

/// Get a blueprint by author and name
///
/// Returns a single blueprint identified by its author and name. The configured filter is
/// applied before returning.
#[utoipa::path(
    get,
    path = "/api/v1/blueprints/{author}/{bpname}",
    tag = "blueprints",
    params(
        ("author" = String, Path, description = "Blueprint author"),
        ("bpname" = String, Path, description = "Blueprint name"),
    ),
    responses(
        (status = 200, description = "Blueprint retrieved successfully", body = ApiResponse<Blueprint>),
        (status = 404, description = "Blueprint not found", body = ApiResponse<String>),
    )
)]
#[get("/blueprints/{author}/{bpname}")]
pub async fn get_blueprint(
    service: web::Data<BlueprintsService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (author, name) = path.into_inner();
    let blueprint = service.get_blueprint(&author, &name).await?;
    Ok(ok(blueprint))
}

/// Create a new blueprint
///
/// Persists a new blueprint with the provided author, name, and list of points.
#[utoipa::path(
    post,
    path = "/api/v1/blueprints",
    tag = "blueprints",
    request_body = NewBlueprint,
    responses(
        (status = 201, description = "Blueprint created successfully", body = ApiResponse<String>),
        (status = 400, description = "Invalid request body", body = ApiResponse<String>),
        (status = 403, description = "Blueprint already exists", body = ApiResponse<String>),
    )
)]
#[post("/blueprints")]
pub async fn create_blueprint(
    req: HttpRequest,
    service: web::Data<BlueprintsService>,
    body: web::Json<NewBlueprint>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    body.validate()?;

    let blueprint: Blueprint = body.into();
    service.add_new_blueprint(blueprint.clone()).await?;
    Ok(created(
        &req,
        &[blueprint.author(), blueprint.name()],
        "Blueprint created successfully",
    ))
}

/// Add a point to a blueprint
///
/// Appends a new point (x, y) to an existing blueprint identified by author and name.
#[utoipa::path(
    put,
    path = "/api/v1/blueprints/{author}/{bpname}/points",
    tag = "blueprints",
    params(
        ("author" = String, Path, description = "Blueprint author"),
        ("bpname" = String, Path, description = "Blueprint name"),
    ),
    request_body = Point,
    responses(
        (status = 202, description = "Point added successfully", body = ApiResponse<String>),
        (status = 404, description = "Blueprint not found", body = ApiResponse<String>),
    )
)]
#[put("/blueprints/{author}/{bpname}/points")]
pub async fn add_point(
    service: web::Data<BlueprintsService>,
    path: web::Path<(String, String)>,
    point: web::Json<Point>,
) -> Result<HttpResponse> {
    let (author, name) = path.into_inner();
    let point = point.into_inner();
    service.add_point(&author, &name, point.x, point.y).await?;
    Ok(accepted("Point added successfully"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{
        http::{header, StatusCode},
        test, App,
    };
    use serde_json::{json, Value};

    use crate::{db::InMemoryGateway, filters::BlueprintFilter, routes};

    use super::*;

    fn app_data(filter: BlueprintFilter) -> web::Data<BlueprintsService> {
        web::Data::new(BlueprintsService::new(
            Arc::new(InMemoryGateway::new()),
            filter,
        ))
    }

    async fn seed(service: &BlueprintsService, author: &str, name: &str, points: &[(i32, i32)]) {
        let points = points.iter().copied().map(Point::from).collect();
        service
            .add_new_blueprint(Blueprint::new(author, name, points))
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn list_returns_200_with_blueprints() {
        let data = app_data(BlueprintFilter::Identity);
        seed(&data, "john", "house", &[(0, 0)]).await;
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(routes::config)).await;

        let req = test::TestRequest::get().uri("/api/v1/blueprints").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 200);
        assert_eq!(body["message"], "execute ok");
        assert_eq!(
            body["data"],
            json!([{ "author": "john", "name": "house", "points": [{ "x": 0, "y": 0 }] }])
        );
    }

    #[actix_web::test]
    async fn by_author_returns_404_when_unknown() {
        let app = test::init_service(
            App::new()
                .app_data(app_data(BlueprintFilter::Identity))
                .configure(routes::config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/blueprints/ghost")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 404);
        assert_eq!(body["message"], "No blueprints for author: ghost");
        assert!(body["data"].is_null());
    }

    #[actix_web::test]
    async fn single_blueprint_is_filtered() {
        let data = app_data(BlueprintFilter::Redundancy);
        seed(&data, "john", "house", &[(1, 1), (1, 1), (2, 2)]).await;
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(routes::config)).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/blueprints/john/house")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["points"], json!([{ "x": 1, "y": 1 }, { "x": 2, "y": 2 }]));

        let req = test::TestRequest::get()
            .uri("/api/v1/blueprints/john")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["points"].as_array().map(Vec::len), Some(3));
    }

    #[actix_web::test]
    async fn create_returns_201_then_403_on_duplicate() {
        let app = test::init_service(
            App::new()
                .app_data(app_data(BlueprintFilter::Identity))
                .configure(routes::config),
        )
        .await;
        let payload = json!({ "author": "alice", "name": "lab", "points": [{ "x": 1, "y": 2 }] });

        let req = test::TestRequest::post()
            .uri("/api/v1/blueprints")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/api/v1/blueprints/alice/lab"
        );
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 201);

        let req = test::TestRequest::post()
            .uri("/api/v1/blueprints")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 403);
        assert_eq!(body["message"], "Blueprint already exists: alice/lab");
    }

    #[actix_web::test]
    async fn created_location_escapes_author_and_name() {
        let app = test::init_service(
            App::new()
                .app_data(app_data(BlueprintFilter::Identity))
                .configure(routes::config),
        )
        .await;

        for (author, name, expected) in [
            ("a/b", "lab", "/api/v1/blueprints/a%2Fb/lab"),
            ("josé", "john doe", "/api/v1/blueprints/jos%C3%A9/john%20doe"),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/v1/blueprints")
                .set_json(json!({ "author": author, "name": name, "points": [] }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            assert_eq!(resp.headers().get(header::LOCATION).unwrap(), expected);
        }
    }

    #[actix_web::test]
    async fn create_rejects_blank_fields() {
        let app = test::init_service(
            App::new()
                .app_data(app_data(BlueprintFilter::Identity))
                .configure(routes::config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/blueprints")
            .set_json(json!({ "author": " ", "points": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 400);
        assert_eq!(
            body["message"],
            "Validation error: author must not be blank, name must not be blank"
        );
    }

    #[actix_web::test]
    async fn create_rejects_malformed_json() {
        let app = test::init_service(
            App::new()
                .app_data(app_data(BlueprintFilter::Identity))
                .configure(routes::config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/blueprints")
            .insert_header(header::ContentType::json())
            .set_payload(r#"{"author": "alice", "name": "lab", "points": [{"x": "one"}]}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 400);
    }

    #[actix_web::test]
    async fn add_point_returns_202_then_404_for_unknown() {
        let data = app_data(BlueprintFilter::Identity);
        seed(&data, "john", "house", &[(0, 0)]).await;
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(routes::config)).await;

        let req = test::TestRequest::put()
            .uri("/api/v1/blueprints/john/house/points")
            .set_json(json!({ "x": 5, "y": 6 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Point added successfully");

        let stored = data.get_blueprint("john", "house").await.unwrap();
        assert_eq!(stored.points(), &[Point::new(0, 0), Point::new(5, 6)]);

        let req = test::TestRequest::put()
            .uri("/api/v1/blueprints/nobody/ghost/points")
            .set_json(json!({ "x": 5, "y": 6 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Blueprint not found: nobody/ghost");
    }
}
