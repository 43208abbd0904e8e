use serde::{Deserialize, Serialize};

use super::{Entity, Query};
use crate::domain::value_objects::{EntityKind, TaxiId};

/// A taxi in the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaxiId>,
    pub seats: u32,
    pub reg: String,
}

impl Taxi {
    pub const MIN_SEATS: u32 = 2;
    pub const MAX_SEATS: u32 = 20;
    /// Exact length of a registration, in characters.
    pub const REG_LEN: usize = 7;

    /// A taxi not yet registered (no id).
    pub fn new(seats: u32, reg: impl Into<String>) -> Self {
        Self {
            id: None,
            seats,
            reg: reg.into(),
        }
    }

    /// The same taxi with surrounding whitespace removed from `reg`.
    pub fn trimmed(self) -> Self {
        let reg = self.reg.trim().to_owned();
        Self { reg, ..self }
    }
}

impl Entity for Taxi {
    type Id = TaxiId;

    const KIND: EntityKind = EntityKind::Taxi;

    fn id(&self) -> Option<TaxiId> {
        self.id
    }

    fn with_id(self, id: TaxiId) -> Self {
        Self { id: Some(id), ..self }
    }

    fn matches(&self, query: &Query) -> bool {
        match query {
            Query::Reg(reg) => self.reg.trim().eq_ignore_ascii_case(reg.trim()),
            _ => false,
        }
    }
}
