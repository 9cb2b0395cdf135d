//! Physical competition areas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a competition area.
pub type AreaId = Uuid;

/// A physical competition area (mat, ring, court).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
}

impl Area {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
