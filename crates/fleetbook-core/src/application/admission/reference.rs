//! Referential checks: does a foreign id identify an existing record?

use std::sync::Arc;

use tracing::debug;

use crate::{
    application::ports::EntityStore,
    domain::{Customer, CustomerId, DomainError, Entity, EntityKind, Taxi, TaxiId},
    error::FleetResult,
};

/// Resolves customer and taxi references against their stores.
#[derive(Clone)]
pub struct ReferenceChecker {
    customers: Arc<dyn EntityStore<Customer>>,
    taxis: Arc<dyn EntityStore<Taxi>>,
}

impl ReferenceChecker {
    pub fn new(customers: Arc<dyn EntityStore<Customer>>, taxis: Arc<dyn EntityStore<Taxi>>) -> Self {
        Self { customers, taxis }
    }

    pub fn customer_exists(&self, id: CustomerId) -> FleetResult<bool> {
        exists(self.customers.as_ref(), id)
    }

    pub fn taxi_exists(&self, id: TaxiId) -> FleetResult<bool> {
        exists(self.taxis.as_ref(), id)
    }

    /// Fails with `ReferenceNotFound(customer)` when the id is dangling.
    pub fn require_customer(&self, id: CustomerId) -> FleetResult<()> {
        require(EntityKind::Customer, id, self.customer_exists(id)?)
    }

    /// Fails with `ReferenceNotFound(taxi)` when the id is dangling.
    pub fn require_taxi(&self, id: TaxiId) -> FleetResult<()> {
        require(EntityKind::Taxi, id, self.taxi_exists(id)?)
    }
}

fn exists<E: Entity>(store: &dyn EntityStore<E>, id: E::Id) -> FleetResult<bool> {
    let found = store.find_by_id(id)?.is_some();
    debug!(kind = %E::KIND, %id, found, "Reference lookup");
    Ok(found)
}

fn require(kind: EntityKind, id: impl Into<u64>, found: bool) -> FleetResult<()> {
    if found {
        Ok(())
    } else {
        Err(DomainError::reference_not_found(kind, id).into())
    }
}
