use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use taproom_customers::CustomerId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_customer).get(list_customers))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/:id/orders", get(list_customer_orders))
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CustomerRequest>,
) -> axum::response::Response {
    let fields = match body.fields() {
        Ok(f) => f,
        Err(e) => return errors::service_error_to_response(e.into()),
    };

    match services.customers.create_customer(fields) {
        Ok(customer) => (
            StatusCode::CREATED,
            Json(dto::customer_to_response(&customer)),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_id("invalid customer id"),
    };

    match services.customers.get_customer(id) {
        Some(customer) => {
            (StatusCode::OK, Json(dto::customer_to_response(&customer))).into_response()
        }
        None => errors::not_found(format!("Customer {id} not found")),
    }
}

pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .customers
        .list_customers()
        .iter()
        .map(dto::customer_to_response)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::CustomerRequest>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_id("invalid customer id"),
    };
    let expected = body.expected_version();
    let fields = match body.fields() {
        Ok(f) => f,
        Err(e) => return errors::service_error_to_response(e.into()),
    };

    match services.customers.update_customer(id, fields, expected) {
        Ok(Some(customer)) => {
            (StatusCode::OK, Json(dto::customer_to_response(&customer))).into_response()
        }
        Ok(None) => errors::not_found(format!("Customer {id} not found")),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_id("invalid customer id"),
    };

    match services.customers.delete_customer(id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::not_found(format!("Customer {id} not found")),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_customer_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::invalid_id("invalid customer id"),
    };

    if services.customers.get_customer(id).is_none() {
        return errors::not_found(format!("Customer {id} not found"));
    }

    match services.orders.list_orders_by_customer(id) {
        Ok(views) => {
            let items = views.iter().map(dto::order_to_response).collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}
