use axum::Router;

pub mod beer;
pub mod customers;
pub mod orders;
pub mod system;

/// Router for all `/api/v1` endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/beer", beer::router())
        .nest("/customer", customers::router())
        .nest("/order", orders::router())
}
