//! Area allocation: bracket subtree chunks and pool round-robin.

use crate::models::{Area, AreaId, Bracket, TournamentStructure};
use std::collections::HashMap;

/// Distribute the structure's matches across physical areas. Pools rotate
/// through the areas in creation order; the bracket is split into
/// `areas * cluster_factor` subtree chunks assigned round-robin, with the
/// remaining finale rounds placed match-by-match on the least-used area.
pub fn assign_areas(structure: &mut TournamentStructure, areas: &[Area]) {
    if areas.is_empty() {
        return;
    }
    for (i, pool) in structure.pools.iter_mut().enumerate() {
        let area = areas[i % areas.len()].id;
        for m in &mut pool.matches {
            m.area = Some(area);
        }
    }
    let factor = structure.config.cluster_factor.max(1);
    if let Some(bracket) = structure.bracket.as_mut() {
        assign_bracket(bracket, areas, factor);
    }
}

fn assign_bracket(bracket: &mut Bracket, areas: &[Area], cluster_factor: usize) {
    let total_rounds = bracket.num_rounds();
    let chunks = areas.len() * cluster_factor;
    let finale_rounds = (chunks.next_power_of_two().trailing_zeros() as usize).min(total_rounds);
    let rounds = bracket.rounds();

    let mut usage: HashMap<AreaId, usize> = areas.iter().map(|a| (a.id, 0)).collect();

    // Chunk phase: every subtree hanging below the finale cutoff goes to one
    // area, cycling through the areas.
    if finale_rounds < total_rounds {
        let chunk_roots = rounds[total_rounds - finale_rounds - 1].clone();
        for (i, root) in chunk_roots.iter().enumerate() {
            let area = areas[i % areas.len()].id;
            for node in bracket.subtree(*root) {
                bracket.node_mut(node).area = Some(area);
                *usage.entry(area).or_insert(0) += 1;
            }
        }
    }

    // Finale phase: match-by-match on the least-used area, preferring one
    // already used by an incoming subtree, tie-broken toward the median of
    // the tied set.
    for round in rounds.iter().skip(total_rounds - finale_rounds) {
        for &node in round {
            let child_areas: Vec<AreaId> = bracket
                .children(node)
                .into_iter()
                .filter_map(|c| bracket.node(c).area)
                .collect();
            let min_usage = areas
                .iter()
                .map(|a| usage[&a.id])
                .min()
                .unwrap_or(0);
            let tied: Vec<AreaId> = areas
                .iter()
                .map(|a| a.id)
                .filter(|id| usage[id] == min_usage)
                .collect();
            let area = tied
                .iter()
                .copied()
                .find(|id| child_areas.contains(id))
                .unwrap_or(tied[tied.len() / 2]);
            bracket.node_mut(node).area = Some(area);
            *usage.entry(area).or_insert(0) += 1;
        }
    }
    log::debug!(
        "bracket split over {} areas: {} finale rounds, usage {:?}",
        areas.len(),
        finale_rounds,
        usage.values().collect::<Vec<_>>()
    );
}
