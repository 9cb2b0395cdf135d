//! TournamentStructure and TournamentError.

use crate::models::bracket::{Bracket, NodeId};
use crate::models::config::CategoryConfig;
use crate::models::match_node::MatchNode;
use crate::models::pool::Pool;
use serde::{Deserialize, Serialize};

/// Errors that can occur during structure operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer than two participants; no structure can be generated.
    NotEnoughParticipants,
    /// Round count of zero.
    InvalidRounds,
    /// Winners-per-pool outside the supported 1–2 range.
    InvalidPoolWinners(usize),
    /// A match was constructed with the same slot on both sides.
    DuplicateSlot(String),
    /// No match with this name in the structure.
    MatchNotFound(String),
    /// No pool with this name in the structure.
    PoolNotFound(String),
    /// The match's winner has been consumed by a parent match.
    MatchFrozen(String),
    /// A record was attached to a match without two concrete participants.
    RecordOnByeMatch(String),
    /// The record's participants do not match the match's slots.
    RecordParticipantMismatch(String),
    /// The record's tie-break flag disagrees with the match's.
    RecordTieBreakMismatch(String),
    /// A pool operation needs every match decided first.
    PoolNotComplete(String),
    /// A decision round was requested but the ranking shows no tie.
    NoTieToBreak(String),
    /// A persisted slot key names no slot or pool in this structure.
    UnknownSlot(String),
    /// The structure has no slots to populate; generate it first.
    EmptyStructure,
    /// A point operation targeted a match without an attached record.
    RecordMissing(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughParticipants => {
                write!(f, "Need at least 2 participants to generate a structure")
            }
            TournamentError::InvalidRounds => write!(f, "Round count must be at least 1"),
            TournamentError::InvalidPoolWinners(n) => {
                write!(f, "Winners per pool must be 1 or 2 (got {})", n)
            }
            TournamentError::DuplicateSlot(m) => {
                write!(f, "Match {} was given the same slot on both sides", m)
            }
            TournamentError::MatchNotFound(m) => write!(f, "No match named {}", m),
            TournamentError::PoolNotFound(p) => write!(f, "No pool named {}", p),
            TournamentError::MatchFrozen(m) => {
                write!(f, "Match {} is frozen (winner already consumed)", m)
            }
            TournamentError::RecordOnByeMatch(m) => {
                write!(f, "Match {} has no two concrete participants", m)
            }
            TournamentError::RecordParticipantMismatch(m) => {
                write!(f, "Record participants do not match match {}", m)
            }
            TournamentError::RecordTieBreakMismatch(m) => {
                write!(f, "Record tie-break flag disagrees with match {}", m)
            }
            TournamentError::PoolNotComplete(p) => {
                write!(f, "Pool {} still has undecided matches", p)
            }
            TournamentError::NoTieToBreak(p) => {
                write!(f, "Pool {} ranking shows no tie at the cutoff", p)
            }
            TournamentError::UnknownSlot(s) => write!(f, "No slot or pool for key {}", s),
            TournamentError::EmptyStructure => {
                write!(f, "Structure has no slots; generate it first")
            }
            TournamentError::RecordMissing(m) => {
                write!(f, "Match {} has no record attached", m)
            }
        }
    }
}

/// Where a named match lives inside a structure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchLocation {
    Bracket(NodeId),
    Pool { pool: usize, index: usize },
}

/// The full generated structure of one category: an optional KO bracket and
/// any number of pools, per configuration. Built once; slot contents, match
/// records and area assignments mutate afterwards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentStructure {
    pub config: CategoryConfig,
    pub bracket: Option<Bracket>,
    pub pools: Vec<Pool>,
}

impl TournamentStructure {
    pub fn pool(&self, name: &str) -> Option<&Pool> {
        self.pools.iter().find(|p| p.name == name)
    }

    pub fn pool_mut(&mut self, name: &str) -> Option<&mut Pool> {
        self.pools.iter_mut().find(|p| p.name == name)
    }

    /// Locate a match by name across the bracket and every pool.
    pub fn locate_match(&self, name: &str) -> Option<MatchLocation> {
        if let Some(bracket) = &self.bracket {
            if let Some(id) = bracket.find_by_name(name) {
                return Some(MatchLocation::Bracket(id));
            }
        }
        for (pi, pool) in self.pools.iter().enumerate() {
            if let Some(mi) = pool.matches.iter().position(|m| m.name == name) {
                return Some(MatchLocation::Pool { pool: pi, index: mi });
            }
        }
        None
    }

    pub fn match_by_name(&self, name: &str) -> Option<&MatchNode> {
        match self.locate_match(name)? {
            MatchLocation::Bracket(id) => Some(self.bracket.as_ref()?.node(id)),
            MatchLocation::Pool { pool, index } => Some(&self.pools[pool].matches[index]),
        }
    }
}
