//! Participant data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (used in slots, records and lookups).
pub type ParticipantId = Uuid;

/// Manual placement hint carried on a participant for one category.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreAssignment {
    /// Place directly into the named starting slot (KO mode).
    Slot(String),
    /// Place directly into the named pool (pool/combined mode).
    Pool(String),
}

/// A participant in a category.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Club affiliation; seeding keeps members of the same club apart.
    pub club: Option<String>,
    /// Keep-apart flag for flagged participants. Carried through but not
    /// consumed by the seeding cost function.
    pub separation: bool,
    /// Manual pre-assignment; bypasses cost-based seeding when set.
    pub pre_assignment: Option<PreAssignment>,
}

impl Participant {
    /// Create a new participant with the given name and no club.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            club: None,
            separation: false,
            pre_assignment: None,
        }
    }

    /// Create a new participant with a club affiliation.
    pub fn with_club(name: impl Into<String>, club: impl Into<String>) -> Self {
        Self {
            club: Some(club.into()),
            ..Self::new(name)
        }
    }

    /// True if both participants carry the same club.
    pub fn same_club(&self, other: &Participant) -> bool {
        match (&self.club, &other.club) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
