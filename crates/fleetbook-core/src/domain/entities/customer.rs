use serde::{Deserialize, Serialize};

use super::{Entity, Query};
use crate::domain::value_objects::{CustomerId, EntityKind};

/// A registered customer.
///
/// Customers are never deleted; see
/// [`CustomerService::delete`](crate::application::CustomerService::delete).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Customer {
    /// Longest accepted name, in characters.
    pub const MAX_NAME_LEN: usize = 50;

    /// A customer not yet registered (no id).
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// The same customer with surrounding whitespace removed from every
    /// text field.
    pub fn trimmed(self) -> Self {
        Self {
            id: self.id,
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
        }
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    const KIND: EntityKind = EntityKind::Customer;

    fn id(&self) -> Option<CustomerId> {
        self.id
    }

    fn with_id(self, id: CustomerId) -> Self {
        Self { id: Some(id), ..self }
    }

    fn matches(&self, query: &Query) -> bool {
        match query {
            Query::Email(email) => self.email.trim().eq_ignore_ascii_case(email.trim()),
            _ => false,
        }
    }
}
