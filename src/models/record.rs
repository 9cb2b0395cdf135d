//! Persisted match outcomes: MatchRecord and MatchPoint.

use crate::models::participant::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match point.
pub type PointId = Uuid;

/// A single scored point (or penalty) inside a match record.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchPoint {
    pub id: PointId,
    /// The participant this point is recorded against/for.
    pub participant: ParticipantId,
    /// Single-character point code; meaning belongs to the active rule set.
    pub code: char,
    pub at: DateTime<Utc>,
    /// Set when a rule cascaded this point from another one (e.g. a penalty
    /// causing an automatic point for the opponent).
    pub caused_by: Option<PointId>,
}

impl MatchPoint {
    pub fn new(participant: ParticipantId, code: char) -> Self {
        Self {
            id: Uuid::new_v4(),
            participant,
            code,
            at: Utc::now(),
            caused_by: None,
        }
    }

    /// A point cascaded from another point by the rule engine.
    pub fn caused(participant: ParticipantId, code: char, cause: PointId) -> Self {
        Self {
            caused_by: Some(cause),
            ..Self::new(participant, code)
        }
    }
}

/// Persisted outcome of one match. Participants are fixed at creation; the
/// winner stays `None` until decided and must be one of the two participants.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    pub red: ParticipantId,
    pub white: ParticipantId,
    pub winner: Option<ParticipantId>,
    /// True for pool decision matches where a drawn outcome is disallowed.
    pub tie_break: bool,
    pub created_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
    /// Points in the order they were scored.
    pub points: Vec<MatchPoint>,
}

impl MatchRecord {
    pub fn new(red: ParticipantId, white: ParticipantId) -> Self {
        Self {
            id: Uuid::new_v4(),
            red,
            white,
            winner: None,
            tie_break: false,
            created_at: Utc::now(),
            finalized_at: None,
            points: Vec::new(),
        }
    }

    /// Record for a pool decision match (no draw allowed).
    pub fn tie_break(red: ParticipantId, white: ParticipantId) -> Self {
        Self {
            tie_break: true,
            ..Self::new(red, white)
        }
    }

    /// True if the given id is one of this record's participants.
    pub fn involves(&self, id: ParticipantId) -> bool {
        self.red == id || self.white == id
    }

    /// The opponent of the given participant, if they are in this record.
    pub fn opponent_of(&self, id: ParticipantId) -> Option<ParticipantId> {
        if self.red == id {
            Some(self.white)
        } else if self.white == id {
            Some(self.red)
        } else {
            None
        }
    }

    /// Ids of every point transitively caused by `root` (excluding `root`).
    pub fn cascade_of(&self, root: PointId) -> Vec<PointId> {
        let mut out = Vec::new();
        let mut frontier = vec![root];
        while let Some(cause) = frontier.pop() {
            for p in &self.points {
                if p.caused_by == Some(cause) && !out.contains(&p.id) {
                    out.push(p.id);
                    frontier.push(p.id);
                }
            }
        }
        out
    }
}
