//! MatchSlot: who occupies a match side.

use crate::models::bracket::NodeId;
use crate::models::participant::Participant;
use serde::{Deserialize, Serialize};

/// The two sides of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Red,
    White,
}

/// Polymorphic occupant of one match side.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSlot {
    /// A (possibly still empty) fixed participant. An empty slot is a bye.
    /// `name` is set for first-round and pool starting slots only; it is the
    /// stable key used in persisted slot assignments.
    Participant {
        name: Option<String>,
        participant: Option<Participant>,
    },
    /// Permanently empty; pads uneven pool-to-KO distributions.
    Bye,
    /// Resolves to the winner of another match in the same bracket.
    MatchWinner { node: NodeId },
    /// Resolves to the pool's participant at `rank` once the pool is decided.
    PoolWinner { pool: String, rank: usize },
}

impl MatchSlot {
    /// An empty named starting slot.
    pub fn open(name: impl Into<String>) -> Self {
        MatchSlot::Participant {
            name: Some(name.into()),
            participant: None,
        }
    }

    /// A slot holding a fixed participant (pool matches).
    pub fn fixed(participant: Participant) -> Self {
        MatchSlot::Participant {
            name: None,
            participant: Some(participant),
        }
    }

    /// True if this slot can never produce a participant.
    pub fn is_bye(&self) -> bool {
        match self {
            MatchSlot::Bye => true,
            MatchSlot::Participant { participant, .. } => participant.is_none(),
            MatchSlot::MatchWinner { .. } | MatchSlot::PoolWinner { .. } => false,
        }
    }

    /// The directly held participant, if any. Winner references resolve via
    /// the owning structure, not here.
    pub fn participant(&self) -> Option<&Participant> {
        match self {
            MatchSlot::Participant { participant, .. } => participant.as_ref(),
            _ => None,
        }
    }

    /// Stable slot name, for first-round/pool starting slots.
    pub fn name(&self) -> Option<&str> {
        match self {
            MatchSlot::Participant { name, .. } => name.as_deref(),
            _ => None,
        }
    }

    /// Put a participant into an open slot. Returns false for non-participant
    /// slot variants.
    pub fn assign(&mut self, p: Participant) -> bool {
        match self {
            MatchSlot::Participant { participant, .. } => {
                *participant = Some(p);
                true
            }
            _ => false,
        }
    }
}
