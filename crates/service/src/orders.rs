use std::sync::Arc;

use taproom_catalog::Beer;
use taproom_core::{Entity, ExpectedVersion};
use taproom_customers::{Customer, CustomerId};
use taproom_orders::{BeerOrder, LineFields, OrderId, OrderLine, OrderStatus};

use crate::error::{ServiceError, ServiceResult};
use crate::store::Arena;

/// A fully assembled order read: the aggregate joined with its customer and
/// lines, each line joined with its beer.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub order: BeerOrder,
    pub customer: Customer,
    pub lines: Vec<LineView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineView {
    pub line: OrderLine,
    pub beer: Beer,
}

/// Order orchestration: placement, aggregate reads, lifecycle transitions and
/// cascading deletes over the order and order-line arenas.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<Arena<BeerOrder>>,
    lines: Arc<Arena<OrderLine>>,
    beers: Arc<Arena<Beer>>,
    customers: Arc<Arena<Customer>>,
}

impl OrderService {
    pub fn new(
        orders: Arc<Arena<BeerOrder>>,
        lines: Arc<Arena<OrderLine>>,
        beers: Arc<Arena<Beer>>,
        customers: Arc<Arena<Customer>>,
    ) -> Self {
        Self {
            orders,
            lines,
            beers,
            customers,
        }
    }

    /// Place a new order: verify the references, persist the aggregate and
    /// its lines, and return the assembled view.
    pub fn create_order(
        &self,
        customer_id: CustomerId,
        customer_ref: Option<String>,
        line_fields: Vec<LineFields>,
    ) -> ServiceResult<OrderView> {
        if !self.customers.contains(customer_id) {
            return Err(ServiceError::MissingReference(format!(
                "Customer {customer_id} not found"
            )));
        }
        for fields in &line_fields {
            if !self.beers.contains(fields.beer_id) {
                return Err(ServiceError::MissingReference(format!(
                    "Beer {} not found",
                    fields.beer_id
                )));
            }
        }

        let mut order = self
            .orders
            .insert(|meta| BeerOrder::new(meta, customer_id, customer_ref))?;
        let mut lines = Vec::with_capacity(line_fields.len());
        for fields in line_fields {
            let line = self.lines.insert(|meta| order.attach_line(meta, fields))?;
            lines.push(line);
        }

        // Persist the line ids gathered on the working copy. Exact(1): a
        // concurrent mutation of the fresh order surfaces as a conflict
        // instead of being overwritten.
        let order = if lines.is_empty() {
            order
        } else {
            let written = self.orders.update(order.id(), ExpectedVersion::Exact(1), |o| {
                *o = order.clone();
                Ok(())
            })?;
            written.ok_or_else(|| {
                ServiceError::Store(format!("order {} vanished during placement", order.id()))
            })?
        };

        tracing::info!(order_id = %order.id(), lines = lines.len(), "order placed");
        self.assemble(order, lines)
    }

    pub fn get_order(&self, id: OrderId) -> ServiceResult<Option<OrderView>> {
        let Some(order) = self.orders.get(id) else {
            return Ok(None);
        };
        let lines = self.lines_of(&order);
        self.assemble(order, lines).map(Some)
    }

    pub fn list_orders(&self) -> ServiceResult<Vec<OrderView>> {
        self.orders
            .list()
            .into_iter()
            .map(|order| {
                let lines = self.lines_of(&order);
                self.assemble(order, lines)
            })
            .collect()
    }

    pub fn list_orders_by_customer(&self, customer_id: CustomerId) -> ServiceResult<Vec<OrderView>> {
        self.orders
            .list()
            .into_iter()
            .filter(|order| order.customer_id() == customer_id)
            .map(|order| {
                let lines = self.lines_of(&order);
                self.assemble(order, lines)
            })
            .collect()
    }

    /// Transition an order's status, enforcing the lifecycle. `None` when the
    /// order is absent; an illegal transition is a typed invariant error.
    pub fn update_order_status(
        &self,
        id: OrderId,
        next: OrderStatus,
        expected: ExpectedVersion,
    ) -> ServiceResult<Option<OrderView>> {
        let Some(order) = self.orders.update(id, expected, |o| o.transition_to(next))? else {
            return Ok(None);
        };
        tracing::info!(order_id = %order.id(), status = %order.status(), "order status updated");
        let lines = self.lines_of(&order);
        self.assemble(order, lines).map(Some)
    }

    /// Cascading delete: the order's lines go with it. `false` when absent.
    pub fn delete_order(&self, id: OrderId) -> ServiceResult<bool> {
        let Some(order) = self.orders.get(id) else {
            return Ok(false);
        };
        for line_id in order.line_ids() {
            self.lines.remove(*line_id)?;
        }
        let removed = self.orders.remove(id)?;
        if removed {
            tracing::info!(order_id = %id, "order deleted");
        }
        Ok(removed)
    }

    fn lines_of(&self, order: &BeerOrder) -> Vec<OrderLine> {
        order
            .line_ids()
            .iter()
            .filter_map(|id| self.lines.get(*id))
            .collect()
    }

    fn assemble(&self, order: BeerOrder, lines: Vec<OrderLine>) -> ServiceResult<OrderView> {
        let Some(customer) = self.customers.get(order.customer_id()) else {
            return Err(ServiceError::MissingReference(format!(
                "Customer {} not found",
                order.customer_id()
            )));
        };
        let mut views = Vec::with_capacity(lines.len());
        for line in lines {
            let Some(beer) = self.beers.get(line.beer_id()) else {
                return Err(ServiceError::MissingReference(format!(
                    "Beer {} not found",
                    line.beer_id()
                )));
            };
            views.push(LineView { line, beer });
        }
        Ok(OrderView {
            order,
            customer,
            lines: views,
        })
    }
}
