//! Pool: a round-robin group with ranked standings.

use crate::models::match_node::MatchNode;
use crate::models::participant::Participant;
use serde::{Deserialize, Serialize};

/// One line of a pool's derived standings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub participant: Participant,
    /// Standard competition rank: ties share a rank, the next distinct
    /// value skips accordingly.
    pub rank: u32,
    pub wins: u32,
    pub points: u32,
}

/// A round-robin pool. Matches are generated from the participant order;
/// decision rounds are appended, never replacing existing matches.
///
/// `version` bumps on every match-record mutation that goes through the pool
/// or structure APIs; the ranking cache remembers the version it was computed
/// at, making invalidation explicit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pool {
    pub name: String,
    pub matches: Vec<MatchNode>,
    /// Seeded participants; the index is the persisted slot-key suffix.
    pub participants: Vec<Participant>,
    pub version: u64,
    #[serde(skip)]
    pub(crate) ranking_cache: Option<(u64, Vec<RankedEntry>)>,
}

impl Pool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matches: Vec::new(),
            participants: Vec::new(),
            version: 0,
            ranking_cache: None,
        }
    }

    /// Record a mutation of this pool's match results.
    pub fn bump_version(&mut self) {
        self.version += 1;
    }

    /// All matches have a decided record attached.
    pub fn is_complete(&self) -> bool {
        !self.matches.is_empty()
            && self
                .matches
                .iter()
                .all(|m| m.record.as_ref().is_some_and(|r| r.winner.is_some()))
    }
}

// Cache contents are derived state; two pools are equal when their persisted
// fields are.
impl PartialEq for Pool {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.matches == other.matches
            && self.participants == other.participants
            && self.version == other.version
    }
}

impl Eq for Pool {}
