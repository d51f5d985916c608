//! Request/response DTOs and pure mapping between wire and domain shapes.
//!
//! Create/update requests carry only mutable business fields; identity,
//! version and timestamps are assigned by the store. Request fields are
//! optional at the serde level so "required" violations surface as field
//! errors, never as deserialization failures. Update requests may echo the
//! last-seen `version` as an optimistic-concurrency expectation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use taproom_catalog::{Beer, BeerFields, BeerId};
use taproom_core::{DomainError, DomainResult, Entity, ExpectedVersion, RecordId};
use taproom_customers::{Customer, CustomerFields, CustomerId};
use taproom_orders::{LineFields, OrderStatus};
use taproom_service::{LineView, OrderView};

fn expectation(version: Option<u64>) -> ExpectedVersion {
    match version {
        Some(v) => ExpectedVersion::Exact(v),
        None => ExpectedVersion::Any,
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerRequest {
    pub beer_name: Option<String>,
    pub beer_style: Option<String>,
    pub upc: Option<String>,
    pub quantity_on_hand: Option<i32>,
    pub price: Option<Decimal>,
    /// Last-seen version; when present, the write is conditional.
    pub version: Option<u64>,
}

impl BeerRequest {
    pub fn expected_version(&self) -> ExpectedVersion {
        expectation(self.version)
    }

    pub fn fields(self) -> DomainResult<BeerFields> {
        BeerFields::parse(
            self.beer_name,
            self.beer_style,
            self.upc,
            self.quantity_on_hand,
            self.price,
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerResponse {
    pub id: i64,
    pub version: u64,
    pub beer_name: String,
    pub beer_style: String,
    pub upc: String,
    pub quantity_on_hand: i32,
    pub price: Decimal,
    pub created_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

pub fn beer_to_response(beer: &Beer) -> BeerResponse {
    BeerResponse {
        id: beer.id().as_i64(),
        version: beer.version(),
        beer_name: beer.name().to_string(),
        beer_style: beer.style().to_string(),
        upc: beer.upc().to_string(),
        quantity_on_hand: beer.quantity_on_hand(),
        price: beer.price(),
        created_date: beer.meta().created_at(),
        update_date: beer.meta().updated_at(),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Last-seen version; when present, the write is conditional.
    pub version: Option<u64>,
}

impl CustomerRequest {
    pub fn expected_version(&self) -> ExpectedVersion {
        expectation(self.version)
    }

    pub fn fields(self) -> DomainResult<CustomerFields> {
        CustomerFields::parse(self.name, self.email, self.phone)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i64,
    pub version: u64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

pub fn customer_to_response(customer: &Customer) -> CustomerResponse {
    CustomerResponse {
        id: customer.id().as_i64(),
        version: customer.version(),
        name: customer.name().to_string(),
        email: customer.email().to_string(),
        phone: customer.phone().map(str::to_string),
        created_date: customer.meta().created_at(),
        update_date: customer.meta().updated_at(),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: Option<i64>,
    pub customer_ref: Option<String>,
    #[serde(default)]
    pub beer_order_lines: Vec<OrderLineRequest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
    pub beer_id: Option<i64>,
    pub order_quantity: Option<i32>,
    pub quantity_allocated: Option<i32>,
}

impl OrderLineRequest {
    fn fields(self) -> DomainResult<LineFields> {
        LineFields::parse(
            self.beer_id.map(|v| BeerId::from(RecordId::from_i64(v))),
            self.order_quantity,
            self.quantity_allocated,
        )
    }
}

impl CreateOrderRequest {
    /// Validate the whole placement request, reporting every violated field.
    /// Line violations carry their 1-based position so repeated lines stay
    /// distinguishable.
    pub fn parse(self) -> DomainResult<(CustomerId, Option<String>, Vec<LineFields>)> {
        let mut violations = Vec::new();

        if self.customer_id.is_none() {
            violations.push("Customer is required".to_string());
        }

        let mut lines = Vec::with_capacity(self.beer_order_lines.len());
        for (idx, line) in self.beer_order_lines.into_iter().enumerate() {
            match line.fields() {
                Ok(fields) => lines.push(fields),
                Err(DomainError::Validation(messages)) => violations.extend(
                    messages
                        .into_iter()
                        .map(|m| format!("line {}: {m}", idx + 1)),
                ),
                Err(other) => return Err(other),
            }
        }

        match self.customer_id {
            Some(raw) if violations.is_empty() => Ok((
                CustomerId::from(RecordId::from_i64(raw)),
                self.customer_ref,
                lines,
            )),
            _ => Err(DomainError::Validation(violations)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub order_status: Option<String>,
    /// Last-seen version; when present, the write is conditional.
    pub version: Option<u64>,
}

impl UpdateOrderStatusRequest {
    pub fn expected_version(&self) -> ExpectedVersion {
        expectation(self.version)
    }

    pub fn status(&self) -> DomainResult<OrderStatus> {
        match self.order_status.as_deref() {
            Some(raw) => raw.parse(),
            None => Err(DomainError::validation_one("Order status is required")),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub version: u64,
    pub order_status: OrderStatus,
    pub customer_ref: Option<String>,
    pub customer: CustomerResponse,
    pub beer_order_lines: Vec<OrderLineResponse>,
    pub created_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineResponse {
    pub id: i64,
    pub version: u64,
    pub beer: BeerResponse,
    pub order_quantity: i32,
    pub quantity_allocated: i32,
}

fn line_to_response(view: &LineView) -> OrderLineResponse {
    OrderLineResponse {
        id: view.line.id().as_i64(),
        version: view.line.version(),
        beer: beer_to_response(&view.beer),
        order_quantity: view.line.order_quantity(),
        quantity_allocated: view.line.quantity_allocated(),
    }
}

pub fn order_to_response(view: &OrderView) -> OrderResponse {
    OrderResponse {
        id: view.order.id().as_i64(),
        version: view.order.version(),
        order_status: view.order.status(),
        customer_ref: view.order.customer_ref().map(str::to_string),
        customer: customer_to_response(&view.customer),
        beer_order_lines: view.lines.iter().map(line_to_response).collect(),
        created_date: view.order.meta().created_at(),
        update_date: view.order.meta().updated_at(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use taproom_core::EntityMeta;

    fn beer() -> Beer {
        let meta = EntityMeta::stamped(BeerId::from(RecordId::from_i64(5)), Utc::now());
        Beer::new(
            meta,
            BeerFields::parse(
                Some("Test Beer".to_string()),
                Some("IPA".to_string()),
                Some("123456".to_string()),
                Some(100),
                Some(Decimal::new(1299, 2)),
            )
            .unwrap(),
        )
    }

    #[test]
    fn beer_response_copies_every_business_field() {
        let beer = beer();
        let response = beer_to_response(&beer);

        assert_eq!(response.id, 5);
        assert_eq!(response.version, 1);
        assert_eq!(response.beer_name, "Test Beer");
        assert_eq!(response.beer_style, "IPA");
        assert_eq!(response.upc, "123456");
        assert_eq!(response.quantity_on_hand, 100);
        assert_eq!(response.price, Decimal::new(1299, 2));
        assert_eq!(response.created_date, beer.meta().created_at());
        assert_eq!(response.update_date, beer.meta().updated_at());
    }

    #[test]
    fn beer_request_without_version_writes_unconditionally() {
        let request = BeerRequest {
            beer_name: Some("Test Beer".to_string()),
            beer_style: Some("IPA".to_string()),
            upc: Some("123456".to_string()),
            quantity_on_hand: Some(100),
            price: Some(Decimal::new(1299, 2)),
            version: None,
        };
        assert_eq!(request.expected_version(), ExpectedVersion::Any);

        let request = BeerRequest {
            version: Some(3),
            ..request
        };
        assert_eq!(request.expected_version(), ExpectedVersion::Exact(3));
    }

    #[test]
    fn order_request_reports_line_violations_with_positions() {
        let request = CreateOrderRequest {
            customer_id: None,
            customer_ref: None,
            beer_order_lines: vec![
                OrderLineRequest {
                    beer_id: Some(1),
                    order_quantity: Some(6),
                    quantity_allocated: Some(0),
                },
                OrderLineRequest {
                    beer_id: None,
                    order_quantity: Some(0),
                    quantity_allocated: None,
                },
            ],
        };

        let err = request.parse().unwrap_err();
        match err {
            DomainError::Validation(violations) => {
                assert_eq!(
                    violations,
                    vec![
                        "Customer is required".to_string(),
                        "line 2: Beer is required".to_string(),
                        "line 2: Order quantity must be greater than zero".to_string(),
                    ]
                );
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn order_request_parses_ids_and_defaults() {
        let request = CreateOrderRequest {
            customer_id: Some(7),
            customer_ref: Some("web-42".to_string()),
            beer_order_lines: vec![OrderLineRequest {
                beer_id: Some(5),
                order_quantity: Some(6),
                quantity_allocated: None,
            }],
        };

        let (customer_id, customer_ref, lines) = request.parse().unwrap();
        assert_eq!(customer_id.as_i64(), 7);
        assert_eq!(customer_ref.as_deref(), Some("web-42"));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].beer_id.as_i64(), 5);
        assert_eq!(lines[0].order_quantity, 6);
        assert_eq!(lines[0].quantity_allocated, 0);
    }

    #[test]
    fn status_request_requires_a_known_status() {
        let request = UpdateOrderStatusRequest {
            order_status: None,
            version: None,
        };
        assert!(matches!(
            request.status().unwrap_err(),
            DomainError::Validation(_)
        ));

        let request = UpdateOrderStatusRequest {
            order_status: Some("BREWING".to_string()),
            version: None,
        };
        assert!(matches!(
            request.status().unwrap_err(),
            DomainError::Validation(_)
        ));

        let request = UpdateOrderStatusRequest {
            order_status: Some("PICKED_UP".to_string()),
            version: None,
        };
        assert_eq!(request.status().unwrap(), OrderStatus::PickedUp);
    }
}
