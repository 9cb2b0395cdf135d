//! Tournament engine logic: pairing, brackets, pools, seeding, rules,
//! ranking, areas and structure orchestration.

mod areas;
mod bracket;
mod combined;
mod pairing;
mod pool;
mod ranking;
mod rules;
mod seeding;
mod structure;

pub use areas::assign_areas;
pub use bracket::{build_bracket, build_with_first_round, rounds_for_slots};
pub use combined::{derive_pool_count, pool_name, winner_first_round};
pub use pairing::{generate_pool_matches, round_robin_pairs};
pub use pool::{generate_decision_round, needs_decision_round, pool_ranking};
pub use ranking::derive_ranking;
pub use rules::{KendoMatchPointHandler, MatchPointHandler};
pub use seeding::{populate_structure, SlotAssignment};
pub use structure::{
    add_match_point, generate_structure, load_match_records, load_participants, match_winner,
    record_match_result, remove_match_point, resolve_slot,
};
