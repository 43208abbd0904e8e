//! Customer Service - registration and lookup of customers.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        admission::email_taken,
        ports::{EntityStore, FieldChecker},
        services::SlotLocks,
    },
    domain::{Customer, CustomerId, DomainError, Entity, EntityKind, Query},
    error::FleetResult,
};

pub struct CustomerService {
    customers: Arc<dyn EntityStore<Customer>>,
    checker: Arc<dyn FieldChecker>,
    locks: SlotLocks<String>,
}

impl CustomerService {
    pub fn new(customers: Arc<dyn EntityStore<Customer>>, checker: Arc<dyn FieldChecker>) -> Self {
        Self {
            customers,
            checker,
            locks: SlotLocks::new(),
        }
    }

    /// Register a customer. Emails are unique, ignoring case.
    #[instrument(skip_all, fields(email = %customer.email))]
    pub fn create(&self, customer: Customer) -> FleetResult<Customer> {
        let customer = Customer { id: None, ..customer.trimmed() };
        self.checker.check_customer(&customer).into_result()?;

        let created = self.locks.with_key(email_key(&customer.email), || {
            self.ensure_email_free(&customer.email, None)?;
            let id = self.customers.insert(customer.clone())?;
            Ok(customer.clone().with_id(id))
        })?;

        info!(id = ?created.id, "Customer created");
        Ok(created)
    }

    #[instrument(skip_all, fields(id = %id))]
    pub fn update(&self, id: CustomerId, customer: Customer) -> FleetResult<Customer> {
        if customer.id != Some(id) {
            warn!(found = ?customer.id, "Customer id mismatch");
            return Err(DomainError::IdentityMismatch {
                kind: EntityKind::Customer,
                expected: id.get(),
                found: customer.id.map(CustomerId::get),
            }
            .into());
        }

        let current = self.require(id)?;
        let customer = customer.trimmed();
        self.checker.check_customer(&customer).into_result()?;

        let keys = [email_key(&current.email), email_key(&customer.email)];
        self.locks.with_keys(&keys, || {
            self.ensure_email_free(&customer.email, Some(id))?;
            self.customers.update(customer.clone())
        })?;

        info!("Customer updated");
        Ok(customer)
    }

    /// Customers are never removed; bookings keep referring to them.
    ///
    /// Returns the stored customer unchanged, or `NotFound`.
    #[instrument(skip(self))]
    pub fn delete(&self, id: CustomerId) -> FleetResult<Customer> {
        let customer = self.require(id)?;
        info!("Customer deletion declined; customers are retained");
        Ok(customer)
    }

    pub fn find_by_id(&self, id: CustomerId) -> FleetResult<Option<Customer>> {
        self.customers.find_by_id(id)
    }

    /// All customers by name (case-insensitive), ties broken by id.
    pub fn find_all_ordered_by_name(&self) -> FleetResult<Vec<Customer>> {
        let mut customers = self.customers.find_all()?;
        customers.sort_by_cached_key(|c| (c.name.to_lowercase(), c.id));
        Ok(customers)
    }

    pub fn find_by_email(&self, email: &str) -> FleetResult<Option<Customer>> {
        Ok(self
            .customers
            .find_by(&Query::Email(email.to_owned()))?
            .into_iter()
            .next())
    }

    fn require(&self, id: CustomerId) -> FleetResult<Customer> {
        self.customers
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found(EntityKind::Customer, id).into())
    }

    fn ensure_email_free(&self, email: &str, exclude: Option<CustomerId>) -> FleetResult<()> {
        if email_taken(self.customers.as_ref(), email, exclude)? {
            warn!(email, "Email already registered");
            return Err(DomainError::DuplicateEmail {
                email: email.to_owned(),
            }
            .into());
        }
        Ok(())
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}
