use std::sync::Arc;

use taproom_catalog::Beer;
use taproom_customers::Customer;
use taproom_orders::{BeerOrder, OrderLine};
use taproom_service::{Arena, CatalogService, CustomerService, OrderService};

/// Service wiring shared by every route: one arena per entity type, shared
/// across the services that need them.
pub struct AppServices {
    pub catalog: CatalogService,
    pub customers: CustomerService,
    pub orders: OrderService,
}

pub fn build_services() -> AppServices {
    let beers = Arc::new(Arena::<Beer>::new());
    let customers = Arc::new(Arena::<Customer>::new());
    let orders = Arc::new(Arena::<BeerOrder>::new());
    let lines = Arc::new(Arena::<OrderLine>::new());

    AppServices {
        catalog: CatalogService::new(beers.clone(), lines.clone()),
        customers: CustomerService::new(customers.clone(), orders.clone()),
        orders: OrderService::new(orders, lines, beers, customers),
    }
}
