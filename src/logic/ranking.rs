//! Pool standings: wins, then points, standard competition ranking.

use crate::logic::rules::MatchPointHandler;
use crate::models::{MatchNode, Participant, ParticipantId, RankedEntry};
use std::collections::HashMap;

/// Derive a total order over `participants` from the completed matches.
/// Wins count strictly; points are real (non-penalty) points. Ties share a
/// rank and the next distinct value skips accordingly (1-2-2-4, not dense).
pub fn derive_ranking(
    matches: &[MatchNode],
    participants: &[Participant],
    handler: &dyn MatchPointHandler,
) -> Vec<RankedEntry> {
    let mut wins: HashMap<ParticipantId, u32> = HashMap::new();
    let mut points: HashMap<ParticipantId, u32> = HashMap::new();

    for m in matches {
        let Some(record) = &m.record else { continue };
        let Some(winner) = record.winner else { continue };
        *wins.entry(winner).or_insert(0) += 1;
        for p in &record.points {
            if !handler.is_penalty(p.code) {
                *points.entry(p.participant).or_insert(0) += 1;
            }
        }
    }

    let mut entries: Vec<RankedEntry> = participants
        .iter()
        .map(|p| RankedEntry {
            wins: wins.get(&p.id).copied().unwrap_or(0),
            points: points.get(&p.id).copied().unwrap_or(0),
            rank: 0,
            participant: p.clone(),
        })
        .collect();
    entries.sort_by(|a, b| (b.wins, b.points).cmp(&(a.wins, a.points)));

    let mut prev: Option<(u32, u32)> = None;
    let mut prev_rank = 0;
    for (i, e) in entries.iter_mut().enumerate() {
        let key = (e.wins, e.points);
        e.rank = if prev == Some(key) {
            prev_rank
        } else {
            i as u32 + 1
        };
        prev = Some(key);
        prev_rank = e.rank;
    }
    entries
}
