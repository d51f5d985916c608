use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use taproom_orders::OrderId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/:id", get(get_order).delete(delete_order))
        .route("/:id/status", put(update_order_status))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let (customer_id, customer_ref, lines) = match body.parse() {
        Ok(parsed) => parsed,
        Err(e) => return errors::service_error_to_response(e.into()),
    };

    match services.orders.create_order(customer_id, customer_ref, lines) {
        Ok(view) => (StatusCode::CREATED, Json(dto::order_to_response(&view))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_id("invalid order id"),
    };

    match services.orders.get_order(id) {
        Ok(Some(view)) => (StatusCode::OK, Json(dto::order_to_response(&view))).into_response(),
        Ok(None) => errors::not_found(format!("Order {id} not found")),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.orders.list_orders() {
        Ok(views) => {
            let items = views.iter().map(dto::order_to_response).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_order_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateOrderStatusRequest>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_id("invalid order id"),
    };
    let next = match body.status() {
        Ok(s) => s,
        Err(e) => return errors::service_error_to_response(e.into()),
    };

    match services
        .orders
        .update_order_status(id, next, body.expected_version())
    {
        Ok(Some(view)) => (StatusCode::OK, Json(dto::order_to_response(&view))).into_response(),
        Ok(None) => errors::not_found(format!("Order {id} not found")),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_id("invalid order id"),
    };

    match services.orders.delete_order(id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::not_found(format!("Order {id} not found")),
        Err(e) => errors::service_error_to_response(e),
    }
}
