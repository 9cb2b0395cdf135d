//! Bracket construction: first round plus fill-to-root.

use crate::models::{Bracket, KoNode, MatchNode, MatchSlot, NodeId, TournamentError};

/// Smallest round count whose first round can host `slots` starting slots.
pub fn rounds_for_slots(slots: usize) -> usize {
    let matches = slots.max(2).div_ceil(2);
    matches.next_power_of_two().trailing_zeros() as usize + 1
}

/// Build an empty KO bracket with the given round count. First-round matches
/// are named "1".."k" and carry two named open slots ("<match>.red",
/// "<match>.white"); later rounds continue the name sequence and reference
/// their children through winner slots.
pub fn build_bracket(rounds: usize) -> Result<Bracket, TournamentError> {
    if rounds == 0 {
        return Err(TournamentError::InvalidRounds);
    }
    let first_round_len = 1usize << (rounds - 1);
    let mut nodes: Vec<KoNode> = Vec::with_capacity(2 * first_round_len - 1);

    for i in 0..first_round_len {
        let name = (i + 1).to_string();
        let m = MatchNode::new(
            name.clone(),
            MatchSlot::open(format!("{}.red", name)),
            MatchSlot::open(format!("{}.white", name)),
        )?;
        nodes.push(KoNode {
            match_node: m,
            parent: None,
        });
    }
    let first_round: Vec<NodeId> = (0..first_round_len).collect();
    fill_bracket(nodes, first_round)
}

/// Build a bracket whose first round is the given list of already-constructed
/// matches (combined mode hands in matches over pool-winner slots).
pub fn build_with_first_round(first: Vec<MatchNode>) -> Result<Bracket, TournamentError> {
    let first_round: Vec<NodeId> = (0..first.len()).collect();
    let nodes = first
        .into_iter()
        .map(|m| KoNode {
            match_node: m,
            parent: None,
        })
        .collect();
    fill_bracket(nodes, first_round)
}

/// Pair consecutive nodes of each round into parents until one root remains,
/// setting parent back-links as each parent is created. The first round must
/// be a non-empty power of two or no complete tree exists.
fn fill_bracket(
    mut nodes: Vec<KoNode>,
    first_round: Vec<NodeId>,
) -> Result<Bracket, TournamentError> {
    if first_round.is_empty() || !first_round.len().is_power_of_two() {
        return Err(TournamentError::InvalidRounds);
    }
    let mut current = first_round.clone();
    while current.len() > 1 {
        let mut next = Vec::with_capacity(current.len() / 2);
        for pair in current.chunks(2) {
            let (a, b) = (pair[0], pair[1]);
            let name = (nodes.len() + 1).to_string();
            let parent = MatchNode::new(
                name,
                MatchSlot::MatchWinner { node: a },
                MatchSlot::MatchWinner { node: b },
            )?;
            let parent_id = nodes.len();
            nodes.push(KoNode {
                match_node: parent,
                parent: None,
            });
            nodes[a].parent = Some(parent_id);
            nodes[b].parent = Some(parent_id);
            next.push(parent_id);
        }
        current = next;
    }
    let root = current[0];
    Ok(Bracket {
        nodes,
        root,
        first_round,
    })
}
