use std::sync::Arc;

use taproom_catalog::{Beer, BeerFields, BeerId};
use taproom_core::{Entity, ExpectedVersion};
use taproom_orders::OrderLine;

use crate::error::{ServiceError, ServiceResult};
use crate::store::Arena;

/// Catalog orchestration: beer CRUD over the beer arena, with a
/// referential-integrity check against order lines on delete.
#[derive(Clone)]
pub struct CatalogService {
    beers: Arc<Arena<Beer>>,
    lines: Arc<Arena<OrderLine>>,
}

impl CatalogService {
    pub fn new(beers: Arc<Arena<Beer>>, lines: Arc<Arena<OrderLine>>) -> Self {
        Self { beers, lines }
    }

    pub fn create_beer(&self, fields: BeerFields) -> ServiceResult<Beer> {
        let beer = self.beers.insert(|meta| Beer::new(meta, fields))?;
        tracing::info!(beer_id = %beer.id(), "beer created");
        Ok(beer)
    }

    pub fn get_beer(&self, id: BeerId) -> Option<Beer> {
        self.beers.get(id)
    }

    pub fn list_beers(&self) -> Vec<Beer> {
        self.beers.list()
    }

    /// Overwrite every business field in place; `None` when the id is absent.
    /// `expected` is the caller's optimistic-concurrency expectation.
    pub fn update_beer(
        &self,
        id: BeerId,
        fields: BeerFields,
        expected: ExpectedVersion,
    ) -> ServiceResult<Option<Beer>> {
        let updated = self.beers.update(id, expected, |beer| {
            beer.set_fields(fields);
            Ok(())
        })?;
        if updated.is_some() {
            tracing::info!(beer_id = %id, "beer updated");
        }
        Ok(updated)
    }

    /// Check existence first, act second; `false` when absent. A beer still
    /// referenced by order lines cannot be deleted.
    pub fn delete_beer(&self, id: BeerId) -> ServiceResult<bool> {
        if !self.beers.contains(id) {
            return Ok(false);
        }
        if self.lines.list().iter().any(|line| line.beer_id() == id) {
            return Err(ServiceError::Conflict(format!(
                "Beer {id} is referenced by existing order lines"
            )));
        }
        let removed = self.beers.remove(id)?;
        if removed {
            tracing::info!(beer_id = %id, "beer deleted");
        }
        Ok(removed)
    }
}
