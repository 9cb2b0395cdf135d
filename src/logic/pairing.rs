//! Round-robin pairing: fixed tables for 3 and 4, the slide algorithm
//! otherwise.

use crate::models::{MatchNode, MatchSlot, Participant, TournamentError};

/// Round-robin pairings over participant indices 0..n. Every unordered pair
/// appears exactly once; 0 or 1 participants yield no pairings.
///
/// The 3- and 4-participant schedules are fixed tables; the 4-table is
/// ordered to avoid back-to-back matches for any one participant. Larger
/// fields use the slide algorithm, with a synthetic bye padding odd counts
/// (bye pairings are dropped, not emitted).
pub fn round_robin_pairs(n: usize) -> Vec<(usize, usize)> {
    match n {
        0 | 1 => Vec::new(),
        2 => vec![(0, 1)],
        3 => vec![(0, 1), (0, 2), (1, 2)],
        4 => vec![(0, 1), (2, 3), (0, 3), (0, 2), (1, 2), (1, 3)],
        _ => slide_pairs(n),
    }
}

/// The slide algorithm. Participants (plus a bye for odd counts) are
/// reordered so round 1 pairs (1,2),(3,4),… rather than first-vs-last; each
/// of the m-1 rounds pairs position i with position m-1-i, then the list
/// rotates by moving the last element to the second position.
fn slide_pairs(n: usize) -> Vec<(usize, usize)> {
    let m = n + n % 2;
    let bye = m - 1; // only meaningful when n is odd

    // Evens ascending, then odds descending: pairing i with m-1-i in the
    // first round yields (0,1),(2,3),…
    let mut order: Vec<usize> = (0..m).step_by(2).collect();
    let mut odds: Vec<usize> = (1..m).step_by(2).collect();
    odds.reverse();
    order.append(&mut odds);

    let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
    for _ in 0..m - 1 {
        for i in 0..m / 2 {
            let (a, b) = (order[i], order[m - 1 - i]);
            if n % 2 == 1 && (a == bye || b == bye) {
                continue;
            }
            pairs.push((a, b));
        }
        if let Some(last) = order.pop() {
            order.insert(1, last);
        }
    }
    pairs
}

/// Generate a pool's round-robin matches over concrete participants.
/// Match names are `"<prefix>-<seq>"`, continuing after `start_seq` matches.
pub fn generate_pool_matches(
    prefix: &str,
    participants: &[Participant],
    start_seq: usize,
) -> Result<Vec<MatchNode>, TournamentError> {
    let mut matches = Vec::new();
    for (i, (a, b)) in round_robin_pairs(participants.len()).into_iter().enumerate() {
        matches.push(MatchNode::new(
            format!("{}-{}", prefix, start_seq + i + 1),
            MatchSlot::fixed(participants[a].clone()),
            MatchSlot::fixed(participants[b].clone()),
        )?);
    }
    Ok(matches)
}
