//! Data structures for the tournament engine: participants, slots, matches,
//! brackets, pools, areas and configuration.

mod area;
mod bracket;
mod config;
mod match_node;
mod participant;
mod pool;
mod record;
mod slot;
mod structure;

pub use area::{Area, AreaId};
pub use bracket::{Bracket, KoNode, NodeId};
pub use config::{CategoryConfig, CategoryMode};
pub use match_node::MatchNode;
pub use participant::{Participant, ParticipantId, PreAssignment};
pub use pool::{Pool, RankedEntry};
pub use record::{MatchPoint, MatchRecord, PointId};
pub use slot::{MatchSlot, Side};
pub use structure::{MatchLocation, TournamentError, TournamentStructure};
