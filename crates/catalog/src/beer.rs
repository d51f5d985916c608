use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use taproom_core::{record_id_newtype, DomainError, DomainResult, Entity, EntityMeta};

record_id_newtype!(BeerId, "BeerId");

/// Catalog entity: a beer offered for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beer {
    meta: EntityMeta<BeerId>,
    name: String,
    style: String,
    upc: String,
    quantity_on_hand: i32,
    price: Decimal,
}

impl Beer {
    /// Build a beer from validated fields and a store-issued stamp.
    pub fn new(meta: EntityMeta<BeerId>, fields: BeerFields) -> Self {
        Self {
            meta,
            name: fields.name,
            style: fields.style,
            upc: fields.upc,
            quantity_on_hand: fields.quantity_on_hand,
            price: fields.price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn upc(&self) -> &str {
        &self.upc
    }

    pub fn quantity_on_hand(&self) -> i32 {
        self.quantity_on_hand
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Overwrite every mutable business field in place. Identity, version and
    /// timestamps are managed by the store, not here.
    pub fn set_fields(&mut self, fields: BeerFields) {
        self.name = fields.name;
        self.style = fields.style;
        self.upc = fields.upc;
        self.quantity_on_hand = fields.quantity_on_hand;
        self.price = fields.price;
    }
}

impl Entity for Beer {
    type Id = BeerId;

    fn meta(&self) -> &EntityMeta<BeerId> {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta<BeerId> {
        &mut self.meta
    }
}

/// Validated business fields for creating or updating a beer.
///
/// The same contract applies to create and update requests. `parse` reports
/// every violated field, never just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeerFields {
    pub name: String,
    pub style: String,
    pub upc: String,
    pub quantity_on_hand: i32,
    pub price: Decimal,
}

impl BeerFields {
    pub fn parse(
        name: Option<String>,
        style: Option<String>,
        upc: Option<String>,
        quantity_on_hand: Option<i32>,
        price: Option<Decimal>,
    ) -> DomainResult<Self> {
        let mut violations = Vec::new();

        let name = require_text(name, "Beer name is required", &mut violations);
        let style = require_text(style, "Beer style is required", &mut violations);
        let upc = require_text(upc, "UPC is required", &mut violations);

        let quantity_on_hand = match quantity_on_hand {
            None => {
                violations.push("Quantity on hand is required".to_string());
                0
            }
            Some(q) if q < 0 => {
                violations.push("Quantity on hand must be zero or greater".to_string());
                q
            }
            Some(q) => q,
        };

        let price = match price {
            None => {
                violations.push("Price is required".to_string());
                Decimal::ZERO
            }
            Some(p) if p <= Decimal::ZERO => {
                violations.push("Price must be greater than zero".to_string());
                p
            }
            Some(p) => p,
        };

        if violations.is_empty() {
            Ok(Self {
                name,
                style,
                upc,
                quantity_on_hand,
                price,
            })
        } else {
            Err(DomainError::Validation(violations))
        }
    }
}

fn require_text(value: Option<String>, message: &str, violations: &mut Vec<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            violations.push(message.to_string());
            String::new()
        }
    }
}
