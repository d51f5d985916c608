use serde::{Deserialize, Serialize};

use taproom_core::{record_id_newtype, DomainError, DomainResult, Entity, EntityMeta};

record_id_newtype!(CustomerId, "CustomerId");

/// A customer able to place beer orders.
///
/// Orders hold the owning side of the relationship; a customer's orders are
/// found by querying the order store, never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    meta: EntityMeta<CustomerId>,
    name: String,
    email: String,
    phone: Option<String>,
}

impl Customer {
    /// Build a customer from validated fields and a store-issued stamp.
    pub fn new(meta: EntityMeta<CustomerId>, fields: CustomerFields) -> Self {
        Self {
            meta,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Overwrite every mutable business field in place. Identity, version and
    /// timestamps are managed by the store, not here.
    pub fn set_fields(&mut self, fields: CustomerFields) {
        self.name = fields.name;
        self.email = fields.email;
        self.phone = fields.phone;
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn meta(&self) -> &EntityMeta<CustomerId> {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta<CustomerId> {
        &mut self.meta
    }
}

/// Validated business fields for creating or updating a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerFields {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl CustomerFields {
    pub fn parse(
        name: Option<String>,
        email: Option<String>,
        phone: Option<String>,
    ) -> DomainResult<Self> {
        let mut violations = Vec::new();

        let name = match name {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                violations.push("Customer name is required".to_string());
                String::new()
            }
        };

        let email = match email {
            Some(v) if !v.trim().is_empty() => {
                if !is_email(&v) {
                    violations.push("Invalid email format".to_string());
                }
                v
            }
            _ => {
                violations.push("Email is required".to_string());
                String::new()
            }
        };

        let phone = phone.filter(|p| !p.trim().is_empty());

        if violations.is_empty() {
            Ok(Self { name, email, phone })
        } else {
            Err(DomainError::Validation(violations))
        }
    }
}

/// Structural email check: one '@' separating a non-empty local part and a
/// non-empty domain, no whitespace anywhere.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}
