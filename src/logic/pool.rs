//! Pool standings access and decision (tie-break) rounds.

use crate::logic::pairing::generate_pool_matches;
use crate::logic::ranking::derive_ranking;
use crate::logic::rules::MatchPointHandler;
use crate::models::{Participant, Pool, RankedEntry, TournamentError};

/// Current standings of the pool, cached against the pool's version counter.
pub fn pool_ranking(pool: &mut Pool, handler: &dyn MatchPointHandler) -> Vec<RankedEntry> {
    if let Some((version, cached)) = &pool.ranking_cache {
        if *version == pool.version {
            return cached.clone();
        }
    }
    let ranking = derive_ranking(&pool.matches, &pool.participants, handler);
    pool.ranking_cache = Some((pool.version, ranking.clone()));
    ranking
}

/// Participants tied across the advancement cutoff, if any. The pool must be
/// complete; `winners` is the number of finishers that advance.
fn tied_at_cutoff(
    pool: &mut Pool,
    winners: usize,
    handler: &dyn MatchPointHandler,
) -> Result<Vec<Participant>, TournamentError> {
    if !pool.is_complete() {
        return Err(TournamentError::PoolNotComplete(pool.name.clone()));
    }
    let ranking = pool_ranking(pool, handler);
    if winners == 0 || ranking.len() <= winners {
        return Ok(Vec::new());
    }
    let last_in = &ranking[winners - 1];
    let first_out = &ranking[winners];
    if (last_in.wins, last_in.points) != (first_out.wins, first_out.points) {
        return Ok(Vec::new());
    }
    let key = (last_in.wins, last_in.points);
    Ok(ranking
        .iter()
        .filter(|e| (e.wins, e.points) == key)
        .map(|e| e.participant.clone())
        .collect())
}

/// True if the advancement cutoff cannot be decided from the round-robin
/// alone and a decision round is required.
pub fn needs_decision_round(
    pool: &mut Pool,
    winners: usize,
    handler: &dyn MatchPointHandler,
) -> Result<bool, TournamentError> {
    Ok(!tied_at_cutoff(pool, winners, handler)?.is_empty())
}

/// Append tie-break matches pairing every participant tied across the
/// cutoff. Existing matches are never replaced. Returns the number of
/// matches added; `NoTieToBreak` if the ranking is already decisive.
pub fn generate_decision_round(
    pool: &mut Pool,
    winners: usize,
    handler: &dyn MatchPointHandler,
) -> Result<usize, TournamentError> {
    let tied = tied_at_cutoff(pool, winners, handler)?;
    if tied.is_empty() {
        return Err(TournamentError::NoTieToBreak(pool.name.clone()));
    }
    let name = pool.name.clone();
    let mut added = generate_pool_matches(&name, &tied, pool.matches.len())?;
    for m in &mut added {
        m.tie_break = true;
    }
    let count = added.len();
    log::debug!(
        "pool {}: decision round with {} matches over {} tied participants",
        name,
        count,
        tied.len()
    );
    pool.matches.append(&mut added);
    pool.bump_version();
    Ok(count)
}
