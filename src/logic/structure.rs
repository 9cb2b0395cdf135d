//! Structure orchestration: generate, load, record results, resolve winners.

use crate::logic::bracket::{build_bracket, build_with_first_round, rounds_for_slots};
use crate::logic::combined::{derive_pool_count, pool_name, winner_first_round};
use crate::logic::pairing::generate_pool_matches;
use crate::logic::ranking::derive_ranking;
use crate::logic::rules::MatchPointHandler;
use crate::models::{
    CategoryConfig, CategoryMode, MatchLocation, MatchPoint, MatchRecord, MatchSlot, NodeId,
    Participant, Pool, PointId, TournamentError, TournamentStructure,
};
use std::collections::HashMap;

/// Build the category's topology (bracket and/or pools) from configuration
/// and participant count. No participants are placed yet; rebuilding with
/// the same inputs yields an identical structure.
pub fn generate_structure(
    config: &CategoryConfig,
    participant_count: usize,
) -> Result<TournamentStructure, TournamentError> {
    if participant_count < 2 {
        return Err(TournamentError::NotEnoughParticipants);
    }
    match config.mode {
        CategoryMode::Knockout => {
            if config.rounds == 0 {
                return Err(TournamentError::InvalidRounds);
            }
            // Grow the configured depth to fit the field.
            let rounds = config.rounds.max(rounds_for_slots(participant_count));
            let bracket = build_bracket(rounds)?;
            log::info!(
                "generated KO structure: {} rounds, {} first-round matches",
                rounds,
                bracket.first_round().len()
            );
            Ok(TournamentStructure {
                config: config.clone(),
                bracket: Some(bracket),
                pools: Vec::new(),
            })
        }
        CategoryMode::Pool => {
            let size = config.pool_size.max(2);
            let count = participant_count.div_ceil(size).max(1);
            let pools = (0..count).map(|i| Pool::new(pool_name(i))).collect();
            log::info!("generated pool structure: {} pools", count);
            Ok(TournamentStructure {
                config: config.clone(),
                bracket: None,
                pools,
            })
        }
        CategoryMode::Combined => {
            if config.rounds == 0 {
                return Err(TournamentError::InvalidRounds);
            }
            let start_slots = 1usize << config.rounds;
            let count = derive_pool_count(start_slots, config.pool_winners, config.max_pools)?;
            let winner_slots = count * config.pool_winners;
            // Shrink the bracket when a pool cap leaves too few winners for
            // the configured depth.
            let rounds = config.rounds.min(rounds_for_slots(winner_slots));
            let first = winner_first_round(count, config.pool_winners, 1usize << rounds)?;
            let bracket = build_with_first_round(first)?;
            let pools = (0..count).map(|i| Pool::new(pool_name(i))).collect();
            log::info!(
                "generated combined structure: {} pools feeding a {}-round bracket",
                count,
                rounds
            );
            Ok(TournamentStructure {
                config: config.clone(),
                bracket: Some(bracket),
                pools,
            })
        }
    }
}

/// Reconstitute participants from a persisted slot assignment: KO keys are
/// starting-slot names, pool keys are `pool.index`. Pool round-robin
/// schedules are (re)generated from the index order, so loading the same
/// assignment into the same topology is deterministic.
pub fn load_participants(
    structure: &mut TournamentStructure,
    assignment: &HashMap<String, Participant>,
) -> Result<(), TournamentError> {
    let mut pool_members: HashMap<String, Vec<(usize, Participant)>> = HashMap::new();

    let mut keys: Vec<&String> = assignment.keys().collect();
    keys.sort();
    for key in keys {
        let participant = assignment[key].clone();
        let slot = structure
            .bracket
            .as_ref()
            .and_then(|b| b.find_slot(key));
        if let Some((node, side)) = slot {
            if let Some(bracket) = structure.bracket.as_mut() {
                bracket.node_mut(node).slot_mut(side).assign(participant);
            }
            continue;
        }
        let Some((pool, index)) = parse_pool_key(key) else {
            return Err(TournamentError::UnknownSlot(key.clone()));
        };
        if structure.pool(pool).is_none() {
            return Err(TournamentError::UnknownSlot(key.clone()));
        }
        pool_members
            .entry(pool.to_string())
            .or_default()
            .push((index, participant));
    }

    for (name, mut members) in pool_members {
        members.sort_by_key(|(i, _)| *i);
        let participants: Vec<Participant> = members.into_iter().map(|(_, p)| p).collect();
        let matches = generate_pool_matches(&name, &participants, 0)?;
        let pool = structure
            .pool_mut(&name)
            .ok_or(TournamentError::PoolNotFound(name.clone()))?;
        pool.participants = participants;
        pool.matches = matches;
    }
    Ok(())
}

fn parse_pool_key(key: &str) -> Option<(&str, usize)> {
    let (pool, index) = key.rsplit_once('.')?;
    Some((pool, index.parse().ok()?))
}

/// Resolve a slot to its concrete participant, if decided: fixed
/// participants directly, winner references recursively (byes advance the
/// opponent), pool ranks via the pool's standings once every pool match is
/// decided and the rank is unambiguous.
pub fn resolve_slot(
    structure: &TournamentStructure,
    slot: &MatchSlot,
    handler: &dyn MatchPointHandler,
) -> Option<Participant> {
    match slot {
        MatchSlot::Participant { participant, .. } => participant.clone(),
        MatchSlot::Bye => None,
        MatchSlot::MatchWinner { node } => match_winner(structure, *node, handler),
        MatchSlot::PoolWinner { pool, rank } => {
            let pool = structure.pool(pool)?;
            if !pool.is_complete() {
                return None;
            }
            let ranking = derive_ranking(&pool.matches, &pool.participants, handler);
            let mut at_rank = ranking.iter().filter(|e| e.rank as usize == *rank);
            match (at_rank.next(), at_rank.next()) {
                (Some(entry), None) => Some(entry.participant.clone()),
                // Still tied at this rank (or rank swallowed by a tie above).
                _ => None,
            }
        }
    }
}

/// Winner of a bracket match: the recorded winner once both sides are
/// concrete, or the lone resolvable side when the other is structurally a
/// bye. An unresolved winner reference (undecided child match, incomplete
/// pool) is not a bye; the match stays undecided until it resolves.
pub fn match_winner(
    structure: &TournamentStructure,
    node: NodeId,
    handler: &dyn MatchPointHandler,
) -> Option<Participant> {
    let bracket = structure.bracket.as_ref()?;
    let m = bracket.node(node);
    let red = resolve_slot(structure, &m.red, handler);
    let white = resolve_slot(structure, &m.white, handler);
    match (red, white) {
        (Some(r), Some(w)) => {
            let winner = m.record.as_ref()?.winner?;
            if winner == r.id {
                Some(r)
            } else if winner == w.id {
                Some(w)
            } else {
                None
            }
        }
        (Some(r), None) if m.white.is_bye() => Some(r),
        (None, Some(w)) if m.red.is_bye() => Some(w),
        _ => None,
    }
}

/// Attach a result record to the named match. Both sides must resolve to the
/// record's participants; a bracket match freezes its children (their
/// results fed this one), a pool match bumps the pool's ranking version.
pub fn record_match_result(
    structure: &mut TournamentStructure,
    name: &str,
    record: MatchRecord,
    handler: &dyn MatchPointHandler,
) -> Result<(), TournamentError> {
    let location = structure
        .locate_match(name)
        .ok_or_else(|| TournamentError::MatchNotFound(name.to_string()))?;
    match location {
        MatchLocation::Bracket(node) => {
            let (red, white, feeder_pools) = {
                let Some(bracket) = structure.bracket.as_ref() else {
                    return Err(TournamentError::MatchNotFound(name.to_string()));
                };
                let m = bracket.node(node);
                let pools: Vec<String> = [&m.red, &m.white]
                    .into_iter()
                    .filter_map(|s| match s {
                        MatchSlot::PoolWinner { pool, .. } => Some(pool.clone()),
                        _ => None,
                    })
                    .collect();
                (
                    resolve_slot(structure, &m.red, handler),
                    resolve_slot(structure, &m.white, handler),
                    pools,
                )
            };
            let Some(bracket) = structure.bracket.as_mut() else {
                return Err(TournamentError::MatchNotFound(name.to_string()));
            };
            bracket
                .node_mut(node)
                .attach_record((red.as_ref(), white.as_ref()), record)?;
            for child in bracket.children(node) {
                bracket.node_mut(child).frozen = true;
            }
            // A consumed pool rank must not change under the record either:
            // every match of a feeding pool is locked.
            for pool_name in feeder_pools {
                if let Some(pool) = structure.pool_mut(&pool_name) {
                    for m in &mut pool.matches {
                        m.frozen = true;
                    }
                }
            }
            Ok(())
        }
        MatchLocation::Pool { pool, index } => {
            let m = &mut structure.pools[pool].matches[index];
            let red = m.red.participant().cloned();
            let white = m.white.participant().cloned();
            m.attach_record((red.as_ref(), white.as_ref()), record)?;
            structure.pools[pool].bump_version();
            Ok(())
        }
    }
}

/// Load persisted match records into the structure. Pool records apply
/// first, then bracket records in name order, so every record's match
/// already has both sides decided when it is attached.
pub fn load_match_records(
    structure: &mut TournamentStructure,
    records: Vec<(String, MatchRecord)>,
    handler: &dyn MatchPointHandler,
) -> Result<(), TournamentError> {
    let mut pool_records = Vec::new();
    let mut bracket_records = Vec::new();
    for (name, record) in records {
        match structure.locate_match(&name) {
            Some(MatchLocation::Pool { .. }) => pool_records.push((name, record)),
            Some(MatchLocation::Bracket(_)) => bracket_records.push((name, record)),
            None => return Err(TournamentError::MatchNotFound(name)),
        }
    }
    bracket_records.sort_by_key(|(name, _)| name.parse::<usize>().unwrap_or(usize::MAX));
    for (name, record) in pool_records.into_iter().chain(bracket_records) {
        record_match_result(structure, &name, record, handler)?;
    }
    Ok(())
}

/// Route a point addition through the active rule set. `Ok(false)` is a rule
/// rejection (e.g. match already decided), not an error.
pub fn add_match_point(
    structure: &mut TournamentStructure,
    name: &str,
    point: MatchPoint,
    handler: &dyn MatchPointHandler,
) -> Result<bool, TournamentError> {
    with_record(structure, name, |record| handler.add_point(record, point))
}

/// Remove a point (and its caused cascade) through the active rule set.
pub fn remove_match_point(
    structure: &mut TournamentStructure,
    name: &str,
    point: PointId,
    handler: &dyn MatchPointHandler,
) -> Result<bool, TournamentError> {
    with_record(structure, name, |record| handler.remove_point(record, point))
}

fn with_record(
    structure: &mut TournamentStructure,
    name: &str,
    op: impl FnOnce(&mut MatchRecord) -> bool,
) -> Result<bool, TournamentError> {
    let location = structure
        .locate_match(name)
        .ok_or_else(|| TournamentError::MatchNotFound(name.to_string()))?;
    match location {
        MatchLocation::Bracket(node) => {
            let Some(bracket) = structure.bracket.as_mut() else {
                return Err(TournamentError::MatchNotFound(name.to_string()));
            };
            let m = bracket.node_mut(node);
            if m.frozen {
                return Err(TournamentError::MatchFrozen(name.to_string()));
            }
            let record = m
                .record
                .as_mut()
                .ok_or_else(|| TournamentError::RecordMissing(name.to_string()))?;
            Ok(op(record))
        }
        MatchLocation::Pool { pool, index } => {
            let m = &mut structure.pools[pool].matches[index];
            if m.frozen {
                return Err(TournamentError::MatchFrozen(name.to_string()));
            }
            let record = m
                .record
                .as_mut()
                .ok_or_else(|| TournamentError::RecordMissing(name.to_string()))?;
            let accepted = op(record);
            if accepted {
                structure.pools[pool].bump_version();
            }
            Ok(accepted)
        }
    }
}
