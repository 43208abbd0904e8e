//! Taxi Service - fleet registration and lookup.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        admission::reg_taken,
        ports::{EntityStore, FieldChecker},
        services::SlotLocks,
    },
    domain::{DomainError, Entity, EntityKind, Query, Taxi, TaxiId},
    error::FleetResult,
};

pub struct TaxiService {
    taxis: Arc<dyn EntityStore<Taxi>>,
    checker: Arc<dyn FieldChecker>,
    locks: SlotLocks<String>,
}

impl TaxiService {
    pub fn new(taxis: Arc<dyn EntityStore<Taxi>>, checker: Arc<dyn FieldChecker>) -> Self {
        Self {
            taxis,
            checker,
            locks: SlotLocks::new(),
        }
    }

    /// Register a taxi. Registrations are unique, ignoring case.
    #[instrument(skip_all, fields(reg = %taxi.reg, seats = taxi.seats))]
    pub fn create(&self, taxi: Taxi) -> FleetResult<Taxi> {
        let taxi = Taxi { id: None, ..taxi.trimmed() };
        self.checker.check_taxi(&taxi).into_result()?;

        let created = self.locks.with_key(reg_key(&taxi.reg), || {
            self.ensure_reg_free(&taxi.reg, None)?;
            let id = self.taxis.insert(taxi.clone())?;
            Ok(taxi.clone().with_id(id))
        })?;

        info!(id = ?created.id, "Taxi created");
        Ok(created)
    }

    #[instrument(skip_all, fields(id = %id))]
    pub fn update(&self, id: TaxiId, taxi: Taxi) -> FleetResult<Taxi> {
        if taxi.id != Some(id) {
            warn!(found = ?taxi.id, "Taxi id mismatch");
            return Err(DomainError::IdentityMismatch {
                kind: EntityKind::Taxi,
                expected: id.get(),
                found: taxi.id.map(TaxiId::get),
            }
            .into());
        }

        let current = self.require(id)?;
        let taxi = taxi.trimmed();
        self.checker.check_taxi(&taxi).into_result()?;

        let keys = [reg_key(&current.reg), reg_key(&taxi.reg)];
        self.locks.with_keys(&keys, || {
            self.ensure_reg_free(&taxi.reg, Some(id))?;
            self.taxis.update(taxi.clone())
        })?;

        info!("Taxi updated");
        Ok(taxi)
    }

    /// Remove taxi `id`, returning what was removed.
    ///
    /// Bookings that refer to it are left in place.
    #[instrument(skip(self))]
    pub fn delete(&self, id: TaxiId) -> FleetResult<Taxi> {
        let removed = self
            .taxis
            .delete(id)?
            .ok_or_else(|| DomainError::not_found(EntityKind::Taxi, id))?;

        info!(reg = %removed.reg, "Taxi deleted");
        Ok(removed)
    }

    pub fn find_by_id(&self, id: TaxiId) -> FleetResult<Option<Taxi>> {
        self.taxis.find_by_id(id)
    }

    pub fn find_all_ordered_by_reg(&self) -> FleetResult<Vec<Taxi>> {
        let mut taxis = self.taxis.find_all()?;
        taxis.sort_by_cached_key(|t| (t.reg.to_uppercase(), t.id));
        Ok(taxis)
    }

    pub fn find_by_reg(&self, reg: &str) -> FleetResult<Option<Taxi>> {
        Ok(self
            .taxis
            .find_by(&Query::Reg(reg.to_owned()))?
            .into_iter()
            .next())
    }

    fn require(&self, id: TaxiId) -> FleetResult<Taxi> {
        self.taxis
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found(EntityKind::Taxi, id).into())
    }

    fn ensure_reg_free(&self, reg: &str, exclude: Option<TaxiId>) -> FleetResult<()> {
        if reg_taken(self.taxis.as_ref(), reg, exclude)? {
            warn!(reg, "Registration already in use");
            return Err(DomainError::DuplicateRegistration { reg: reg.to_owned() }.into());
        }
        Ok(())
    }
}

fn reg_key(reg: &str) -> String {
    reg.trim().to_uppercase()
}
