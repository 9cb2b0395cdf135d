//! Tournament structure engine: KO brackets, round-robin pools, combined
//! pool-to-bracket categories, cost-based seeding and area allocation.

pub mod logic;
pub mod models;

pub use logic::{
    add_match_point, assign_areas, derive_ranking, generate_decision_round, generate_structure,
    load_match_records, load_participants, match_winner, needs_decision_round, pool_ranking,
    populate_structure, record_match_result, remove_match_point, resolve_slot, round_robin_pairs,
    KendoMatchPointHandler, MatchPointHandler, SlotAssignment,
};
pub use models::{
    Area, AreaId, Bracket, CategoryConfig, CategoryMode, KoNode, MatchNode, MatchPoint,
    MatchRecord, MatchSlot, NodeId, Participant, ParticipantId, Pool, PreAssignment, RankedEntry,
    Side, TournamentError, TournamentStructure,
};
