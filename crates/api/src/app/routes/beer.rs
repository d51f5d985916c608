use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use taproom_catalog::BeerId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_beer).get(list_beers))
        .route("/:id", get(get_beer).put(update_beer).delete(delete_beer))
}

pub async fn create_beer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::BeerRequest>,
) -> axum::response::Response {
    let fields = match body.fields() {
        Ok(f) => f,
        Err(e) => return errors::service_error_to_response(e.into()),
    };

    match services.catalog.create_beer(fields) {
        Ok(beer) => (StatusCode::CREATED, Json(dto::beer_to_response(&beer))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_beer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BeerId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_id("invalid beer id"),
    };

    match services.catalog.get_beer(id) {
        Some(beer) => (StatusCode::OK, Json(dto::beer_to_response(&beer))).into_response(),
        None => errors::not_found(format!("Beer {id} not found")),
    }
}

pub async fn list_beers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .catalog
        .list_beers()
        .iter()
        .map(dto::beer_to_response)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn update_beer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::BeerRequest>,
) -> axum::response::Response {
    let id: BeerId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_id("invalid beer id"),
    };
    let expected = body.expected_version();
    let fields = match body.fields() {
        Ok(f) => f,
        Err(e) => return errors::service_error_to_response(e.into()),
    };

    match services.catalog.update_beer(id, fields, expected) {
        Ok(Some(beer)) => (StatusCode::OK, Json(dto::beer_to_response(&beer))).into_response(),
        Ok(None) => errors::not_found(format!("Beer {id} not found")),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_beer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BeerId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_id("invalid beer id"),
    };

    match services.catalog.delete_beer(id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::not_found(format!("Beer {id} not found")),
        Err(e) => errors::service_error_to_response(e),
    }
}
