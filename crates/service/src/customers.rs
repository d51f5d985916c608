use std::sync::Arc;

use taproom_core::{Entity, ExpectedVersion};
use taproom_customers::{Customer, CustomerFields, CustomerId};
use taproom_orders::BeerOrder;

use crate::error::{ServiceError, ServiceResult};
use crate::store::Arena;

/// Customer orchestration: CRUD over the customer arena, with a
/// referential-integrity check against orders on delete.
#[derive(Clone)]
pub struct CustomerService {
    customers: Arc<Arena<Customer>>,
    orders: Arc<Arena<BeerOrder>>,
}

impl CustomerService {
    pub fn new(customers: Arc<Arena<Customer>>, orders: Arc<Arena<BeerOrder>>) -> Self {
        Self { customers, orders }
    }

    pub fn create_customer(&self, fields: CustomerFields) -> ServiceResult<Customer> {
        let customer = self.customers.insert(|meta| Customer::new(meta, fields))?;
        tracing::info!(customer_id = %customer.id(), "customer created");
        Ok(customer)
    }

    pub fn get_customer(&self, id: CustomerId) -> Option<Customer> {
        self.customers.get(id)
    }

    pub fn list_customers(&self) -> Vec<Customer> {
        self.customers.list()
    }

    pub fn update_customer(
        &self,
        id: CustomerId,
        fields: CustomerFields,
        expected: ExpectedVersion,
    ) -> ServiceResult<Option<Customer>> {
        let updated = self.customers.update(id, expected, |customer| {
            customer.set_fields(fields);
            Ok(())
        })?;
        if updated.is_some() {
            tracing::info!(customer_id = %id, "customer updated");
        }
        Ok(updated)
    }

    /// Check existence first, act second; `false` when absent. A customer
    /// with existing orders cannot be deleted; orders own the relationship.
    pub fn delete_customer(&self, id: CustomerId) -> ServiceResult<bool> {
        if !self.customers.contains(id) {
            return Ok(false);
        }
        if self.orders.list().iter().any(|order| order.customer_id() == id) {
            return Err(ServiceError::Conflict(format!(
                "Customer {id} has existing orders"
            )));
        }
        let removed = self.customers.remove(id)?;
        if removed {
            tracing::info!(customer_id = %id, "customer deleted");
        }
        Ok(removed)
    }
}
