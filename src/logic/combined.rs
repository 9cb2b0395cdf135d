//! Combined mode: pool-count derivation and pool-winner-to-bracket
//! clustering.

use crate::models::{MatchNode, MatchSlot, TournamentError};
use std::collections::HashMap;

/// Canonical pool name for a zero-based pool index.
pub fn pool_name(index: usize) -> String {
    format!("P{}", index + 1)
}

/// Number of pools feeding a bracket with `start_slots` starting slots:
/// the next power of two of `start_slots / winners`, capped by `max_pools`.
/// Only 1 or 2 winners per pool are supported.
pub fn derive_pool_count(
    start_slots: usize,
    winners: usize,
    max_pools: Option<usize>,
) -> Result<usize, TournamentError> {
    if !(1..=2).contains(&winners) {
        return Err(TournamentError::InvalidPoolWinners(winners));
    }
    let mut pools = (start_slots / winners).max(1).next_power_of_two();
    if let Some(max) = max_pools {
        pools = pools.min(max.max(1));
    }
    Ok(pools)
}

/// A pool-winner slot during clustering: zero-based pool index plus
/// one-based rank. Indices at or above the real pool count are synthetic
/// dummy pools that materialize as byes.
type WinnerSlot = (usize, usize);

/// Pool-winner slots grouped per rank, top rank first.
#[derive(Clone, Debug)]
struct Chunk {
    ranks: Vec<Vec<usize>>,
}

impl Chunk {
    fn len(&self) -> usize {
        self.ranks.iter().map(Vec::len).sum()
    }

    /// Slots in rank order, real pools before dummies within each rank.
    fn slots(&self, num_pools: usize) -> Vec<WinnerSlot> {
        let mut out = Vec::with_capacity(self.len());
        for (r, list) in self.ranks.iter().enumerate() {
            let (real, dummy): (Vec<_>, Vec<_>) = list.iter().partition(|&&p| p < num_pools);
            out.extend(real.into_iter().map(|&p| (p, r + 1)));
            out.extend(dummy.into_iter().map(|&p| (p, r + 1)));
        }
        out
    }
}

/// Build the bracket's first-round matches over pool-winner slots so that
/// members of the same pool meet as late as possible: one chunk holding all
/// rank lists is iteratively halved, each half drawing the least-used pool id
/// in turn (usage weighted higher for top ranks), until chunks hold 2 or 3
/// slots. A 3-chunk becomes one bye-padded match plus one real match; dummy
/// pool ids pad the slot count up to `total_slots` and become byes.
pub fn winner_first_round(
    num_pools: usize,
    winners: usize,
    total_slots: usize,
) -> Result<Vec<MatchNode>, TournamentError> {
    let mut ranks: Vec<Vec<usize>> = (0..winners).map(|_| (0..num_pools).collect()).collect();

    // Pad with distinct dummy pool ids, bottom rank first, cycling upward.
    let mut next_dummy = num_pools;
    let mut rank = winners - 1;
    while ranks.iter().map(Vec::len).sum::<usize>() < total_slots {
        ranks[rank].push(next_dummy);
        next_dummy += 1;
        rank = rank.checked_sub(1).unwrap_or(winners - 1);
    }

    let mut chunks = vec![Chunk { ranks }];
    loop {
        let mut next = Vec::with_capacity(chunks.len() * 2);
        let mut split_any = false;
        for chunk in chunks {
            if chunk.len() <= 3 {
                next.push(chunk);
            } else {
                let (left, right) = halve(&chunk, winners);
                next.push(left);
                next.push(right);
                split_any = true;
            }
        }
        chunks = next;
        if !split_any {
            break;
        }
    }

    let mut pairings: Vec<(WinnerSlot, Option<WinnerSlot>)> = Vec::new();
    for chunk in &chunks {
        let slots = chunk.slots(num_pools);
        match slots.len() {
            2 => pairings.push((slots[0], Some(slots[1]))),
            3 => {
                pairings.push((slots[0], None));
                pairings.push((slots[1], Some(slots[2])));
            }
            // A 1-slot chunk only occurs for a degenerate 2-slot bracket
            // that was never split.
            _ => pairings.push((slots[0], None)),
        }
    }
    repair_double_byes(&mut pairings, num_pools);

    let mut matches = Vec::new();
    for (red, white) in &pairings {
        matches.push(winner_match(
            matches.len() + 1,
            red,
            white.as_ref(),
            num_pools,
        )?);
    }
    log::debug!(
        "combined: {} pools x {} winners clustered into {} first-round matches",
        num_pools,
        winners,
        matches.len()
    );
    Ok(matches)
}

/// A pool cap can leave enough dummy ids that the halving pairs two of them
/// together. Swap a real slot in from a fully real pairing; real slots
/// outnumber the matches, so one always exists.
fn repair_double_byes(pairings: &mut [(WinnerSlot, Option<WinnerSlot>)], num_pools: usize) {
    let is_real = |slot: &WinnerSlot| slot.0 < num_pools;
    for i in 0..pairings.len() {
        let both_bye =
            !is_real(&pairings[i].0) && !pairings[i].1.as_ref().is_some_and(&is_real);
        if !both_bye {
            continue;
        }
        let donor = (0..pairings.len()).find(|&j| {
            is_real(&pairings[j].0) && pairings[j].1.as_ref().is_some_and(&is_real)
        });
        if let Some(j) = donor {
            // The donor keeps its red slot and fights a bye instead.
            if let Some(moved) = pairings[j].1.take() {
                let dummy = pairings[i].0;
                pairings[i] = (moved, Some(dummy));
            }
        }
    }
}

fn winner_match(
    seq: usize,
    red: &WinnerSlot,
    white: Option<&WinnerSlot>,
    num_pools: usize,
) -> Result<MatchNode, TournamentError> {
    let to_slot = |&(pool, rank): &WinnerSlot| {
        if pool < num_pools {
            MatchSlot::PoolWinner {
                pool: pool_name(pool),
                rank,
            }
        } else {
            MatchSlot::Bye
        }
    };
    MatchNode::new(
        seq.to_string(),
        to_slot(red),
        white.map(to_slot).unwrap_or(MatchSlot::Bye),
    )
}

/// Split one chunk into two halves. The halves take turns; on its turn a
/// half removes from the current rank list the pool id it has used least,
/// weighting usage by `winners - rank` so top ranks dominate placement.
fn halve(chunk: &Chunk, winners: usize) -> (Chunk, Chunk) {
    let empty = || Chunk {
        ranks: vec![Vec::new(); chunk.ranks.len()],
    };
    let mut halves = [empty(), empty()];
    let mut usage: [HashMap<usize, u32>; 2] = [HashMap::new(), HashMap::new()];
    let mut turn = 0usize;

    for (r, list) in chunk.ranks.iter().enumerate() {
        let weight = (winners - r) as u32;
        let mut remaining = list.clone();
        while !remaining.is_empty() {
            let pick = remaining
                .iter()
                .enumerate()
                .min_by_key(|(_, p)| usage[turn].get(*p).copied().unwrap_or(0))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let pool = remaining.remove(pick);
            halves[turn].ranks[r].push(pool);
            *usage[turn].entry(pool).or_insert(0) += weight;
            turn = 1 - turn;
        }
    }
    let [left, right] = halves;
    (left, right)
}
