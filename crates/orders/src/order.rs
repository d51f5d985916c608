use serde::{Deserialize, Serialize};

use taproom_catalog::BeerId;
use taproom_core::{record_id_newtype, DomainError, DomainResult, Entity, EntityMeta};
use taproom_customers::CustomerId;

use crate::status::OrderStatus;

record_id_newtype!(OrderId, "OrderId");
record_id_newtype!(OrderLineId, "OrderLineId");

/// A single beer/quantity pairing within an order.
///
/// Lines are owned by their order: they are only created through
/// [`BeerOrder::attach_line`], which fixes the owner back-reference, and they
/// are removed together with the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    meta: EntityMeta<OrderLineId>,
    order_id: OrderId,
    beer_id: BeerId,
    order_quantity: i32,
    quantity_allocated: i32,
}

impl OrderLine {
    /// The owning order. Maintained by the aggregate; there is no setter.
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn beer_id(&self) -> BeerId {
        self.beer_id
    }

    pub fn order_quantity(&self) -> i32 {
        self.order_quantity
    }

    /// Portion of the requested quantity reserved from stock.
    pub fn quantity_allocated(&self) -> i32 {
        self.quantity_allocated
    }
}

impl Entity for OrderLine {
    type Id = OrderLineId;

    fn meta(&self) -> &EntityMeta<OrderLineId> {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta<OrderLineId> {
        &mut self.meta
    }
}

/// Validated fields for one order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFields {
    pub beer_id: BeerId,
    pub order_quantity: i32,
    pub quantity_allocated: i32,
}

impl LineFields {
    /// Uniform line validation; reports every violated field. An omitted
    /// allocation defaults to zero (nothing reserved yet), and an allocation
    /// can never exceed the ordered quantity.
    pub fn parse(
        beer_id: Option<BeerId>,
        order_quantity: Option<i32>,
        quantity_allocated: Option<i32>,
    ) -> DomainResult<Self> {
        let mut violations = Vec::new();

        if beer_id.is_none() {
            violations.push("Beer is required".to_string());
        }

        match order_quantity {
            None => violations.push("Order quantity is required".to_string()),
            Some(q) if q <= 0 => {
                violations.push("Order quantity must be greater than zero".to_string());
            }
            Some(_) => {}
        }

        let quantity_allocated = quantity_allocated.unwrap_or(0);
        if quantity_allocated < 0 {
            violations.push("Quantity allocated must be zero or greater".to_string());
        } else if matches!(order_quantity, Some(q) if q > 0 && quantity_allocated > q) {
            violations.push("Quantity allocated cannot exceed order quantity".to_string());
        }

        if violations.is_empty() {
            if let (Some(beer_id), Some(order_quantity)) = (beer_id, order_quantity) {
                return Ok(Self {
                    beer_id,
                    order_quantity,
                    quantity_allocated,
                });
            }
        }
        Err(DomainError::Validation(violations))
    }
}

/// Aggregate root: a beer order.
///
/// The aggregate holds the identifiers of its lines; the line records live in
/// their own store, keyed by id. This keeps the order ↔ line relationship
/// bidirectional without a cyclic object graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeerOrder {
    meta: EntityMeta<OrderId>,
    status: OrderStatus,
    customer_id: CustomerId,
    customer_ref: Option<String>,
    line_ids: Vec<OrderLineId>,
}

impl BeerOrder {
    /// A freshly placed order: status NEW, no lines yet.
    pub fn new(
        meta: EntityMeta<OrderId>,
        customer_id: CustomerId,
        customer_ref: Option<String>,
    ) -> Self {
        Self {
            meta,
            status: OrderStatus::New,
            customer_id,
            customer_ref,
            line_ids: Vec::new(),
        }
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn customer_ref(&self) -> Option<&str> {
        self.customer_ref.as_deref()
    }

    pub fn line_ids(&self) -> &[OrderLineId] {
        &self.line_ids
    }

    /// The single aggregate-level line mutation: builds the line with its
    /// owner back-reference pointing at this order and records its id on the
    /// aggregate. Lines cannot be constructed any other way, so the two sides
    /// of the relationship cannot drift apart.
    pub fn attach_line(&mut self, meta: EntityMeta<OrderLineId>, fields: LineFields) -> OrderLine {
        let line = OrderLine {
            meta,
            order_id: self.id(),
            beer_id: fields.beer_id,
            order_quantity: fields.order_quantity,
            quantity_allocated: fields.quantity_allocated,
        };
        self.line_ids.push(line.id());
        line
    }

    /// Move the order along its lifecycle, rejecting illegal transitions.
    pub fn transition_to(&mut self, next: OrderStatus) -> DomainResult<()> {
        self.status.check_transition_to(next)?;
        self.status = next;
        Ok(())
    }
}

impl Entity for BeerOrder {
    type Id = OrderId;

    fn meta(&self) -> &EntityMeta<OrderId> {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta<OrderId> {
        &mut self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use taproom_core::RecordId;

    fn order_meta(id: i64) -> EntityMeta<OrderId> {
        EntityMeta::stamped(OrderId::new(RecordId::from_i64(id)), Utc::now())
    }

    fn line_meta(id: i64) -> EntityMeta<OrderLineId> {
        EntityMeta::stamped(OrderLineId::new(RecordId::from_i64(id)), Utc::now())
    }

    fn beer_id(id: i64) -> BeerId {
        BeerId::new(RecordId::from_i64(id))
    }

    fn customer_id(id: i64) -> CustomerId {
        CustomerId::new(RecordId::from_i64(id))
    }

    fn line_fields(beer: i64, quantity: i32, allocated: i32) -> LineFields {
        LineFields::parse(Some(beer_id(beer)), Some(quantity), Some(allocated)).unwrap()
    }

    #[test]
    fn new_order_starts_in_new_status_without_lines() {
        let order = BeerOrder::new(order_meta(1), customer_id(7), None);
        assert_eq!(order.status(), OrderStatus::New);
        assert!(order.line_ids().is_empty());
        assert_eq!(order.customer_id(), customer_id(7));
    }

    #[test]
    fn attach_line_sets_back_reference_and_records_id() {
        let mut order = BeerOrder::new(order_meta(1), customer_id(7), None);

        let line = order.attach_line(line_meta(10), line_fields(3, 6, 2));

        assert_eq!(line.order_id(), order.id());
        assert_eq!(line.beer_id(), beer_id(3));
        assert_eq!(line.order_quantity(), 6);
        assert_eq!(line.quantity_allocated(), 2);
        assert_eq!(order.line_ids(), &[line.id()]);
    }

    #[test]
    fn attach_line_keeps_line_order() {
        let mut order = BeerOrder::new(order_meta(1), customer_id(7), None);

        let first = order.attach_line(line_meta(10), line_fields(3, 6, 0));
        let second = order.attach_line(line_meta(11), line_fields(4, 12, 0));

        assert_eq!(order.line_ids(), &[first.id(), second.id()]);
    }

    #[test]
    fn transition_follows_the_forward_path() {
        let mut order = BeerOrder::new(order_meta(1), customer_id(7), None);

        order.transition_to(OrderStatus::Ready).unwrap();
        order.transition_to(OrderStatus::PickedUp).unwrap();
        order.transition_to(OrderStatus::Delivered).unwrap();
        assert_eq!(order.status(), OrderStatus::Delivered);
    }

    #[test]
    fn illegal_transition_is_rejected_and_leaves_status_unchanged() {
        let mut order = BeerOrder::new(order_meta(1), customer_id(7), None);

        let err = order.transition_to(OrderStatus::Delivered).unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) => {
                assert_eq!(msg, "cannot transition from NEW to DELIVERED");
            }
            _ => panic!("Expected InvariantViolation"),
        }
        assert_eq!(order.status(), OrderStatus::New);
    }

    #[test]
    fn cancelled_orders_accept_no_further_transitions() {
        let mut order = BeerOrder::new(order_meta(1), customer_id(7), None);
        order.transition_to(OrderStatus::Cancelled).unwrap();

        for next in OrderStatus::ALL {
            assert!(order.transition_to(next).is_err());
        }
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn line_parse_defaults_allocation_to_zero() {
        let fields = LineFields::parse(Some(beer_id(3)), Some(6), None).unwrap();
        assert_eq!(fields.quantity_allocated, 0);
    }

    #[test]
    fn line_parse_rejects_allocation_beyond_order_quantity() {
        let err = LineFields::parse(Some(beer_id(3)), Some(6), Some(7)).unwrap_err();
        match err {
            DomainError::Validation(violations) => {
                assert_eq!(
                    violations,
                    vec!["Quantity allocated cannot exceed order quantity".to_string()]
                );
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn line_parse_reports_every_violated_field() {
        let err = LineFields::parse(None, Some(0), Some(-1)).unwrap_err();
        match err {
            DomainError::Validation(violations) => {
                assert_eq!(
                    violations,
                    vec![
                        "Beer is required".to_string(),
                        "Order quantity must be greater than zero".to_string(),
                        "Quantity allocated must be zero or greater".to_string(),
                    ]
                );
            }
            _ => panic!("Expected Validation error"),
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Allocations within [0, quantity] always parse; anything above
            /// the ordered quantity is always rejected.
            #[test]
            fn allocation_bound_is_enforced(
                quantity in 1i32..10_000,
                allocated in 0i32..20_000,
            ) {
                let result = LineFields::parse(
                    Some(beer_id(1)),
                    Some(quantity),
                    Some(allocated),
                );
                if allocated <= quantity {
                    prop_assert!(result.is_ok());
                } else {
                    prop_assert!(result.is_err());
                }
            }

            /// A failed transition never changes the stored status.
            #[test]
            fn failed_transitions_leave_status_unchanged(
                step1 in 0usize..5,
                step2 in 0usize..5,
            ) {
                let mut order = BeerOrder::new(order_meta(1), customer_id(7), None);
                let _ = order.transition_to(OrderStatus::ALL[step1]);
                let before = order.status();
                if order.transition_to(OrderStatus::ALL[step2]).is_err() {
                    prop_assert_eq!(order.status(), before);
                }
            }
        }
    }
}
