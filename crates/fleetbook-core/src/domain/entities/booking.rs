use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, Query};
use crate::domain::value_objects::{BookingId, CustomerId, EntityKind, TaxiId};

/// A reservation of one taxi for one customer on one calendar date.
///
/// Every field is optional so that a *draft* with missing pieces can still be
/// represented and rejected field-by-field. A booking is *committed* once the
/// store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookingId>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    #[serde(default)]
    pub taxi_id: Option<TaxiId>,
}

impl Booking {
    /// A complete draft awaiting admission.
    pub fn draft(customer_id: CustomerId, taxi_id: TaxiId, date: NaiveDate) -> Self {
        Self {
            id: None,
            date: Some(date),
            customer_id: Some(customer_id),
            taxi_id: Some(taxi_id),
        }
    }

    pub fn is_committed(&self) -> bool {
        self.id.is_some()
    }

    /// The (taxi, date) slot this booking occupies, when both are known.
    pub fn slot(&self) -> Option<(TaxiId, NaiveDate)> {
        self.taxi_id.zip(self.date)
    }
}

impl Entity for Booking {
    type Id = BookingId;

    const KIND: EntityKind = EntityKind::Booking;

    fn id(&self) -> Option<BookingId> {
        self.id
    }

    fn with_id(self, id: BookingId) -> Self {
        Self { id: Some(id), ..self }
    }

    fn matches(&self, query: &Query) -> bool {
        match query {
            Query::Customer(id) => self.customer_id == Some(*id),
            Query::Taxi(id) => self.taxi_id == Some(*id),
            Query::Email(_) | Query::Reg(_) => false,
        }
    }
}
