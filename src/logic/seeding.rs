//! Seeding: cost-minimizing placement of participants into starting slots.

use crate::logic::structure::load_participants;
use crate::models::{
    CategoryMode, MatchSlot, NodeId, Participant, PreAssignment, Side, TournamentError,
    TournamentStructure,
};
use rand::seq::SliceRandom;
use std::collections::HashMap;

/// Extra pairwise weight when two placed participants share a club.
const CLUB_WEIGHT: f64 = 10.0;
/// Inverse-distance value used for distance 0 (same slot or same pool);
/// zero distance counts as distance 1/8, dominating every real distance.
const NO_DISTANCE_PENALTY: f64 = 8.0;
/// Treat cost differences below this as ties.
const COST_EPS: f64 = 1e-9;

/// Result of a seeding pass: slot-name → participant, plus participants
/// that found no capacity.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotAssignment {
    pub assigned: HashMap<String, Participant>,
    pub unassigned: Vec<Participant>,
}

/// A starting position participants can be seeded into: a first-round KO
/// slot (capacity 1) or a pool (capacity = its share of the field).
struct Seat {
    key: String,
    capacity: usize,
    /// First-round bracket position anchoring this seat for the distance
    /// matrix; `None` in pure pool mode.
    anchor: Option<(NodeId, Side)>,
    is_pool: bool,
}

struct Placement {
    participant: Participant,
    seat: usize,
    /// Pre-assigned placements never move in the refinement pass.
    pinned: bool,
}

/// Seed `participants` into the generated structure: honor pre-assignment
/// hints, shuffle the rest, place each greedily at the cost-minimal seat,
/// then run one best-improvement swap pass. The resulting assignment is
/// applied to the structure (slots filled, pool schedules generated) and
/// returned for persistence.
pub fn populate_structure(
    structure: &mut TournamentStructure,
    participants: &[Participant],
) -> Result<SlotAssignment, TournamentError> {
    let seats = build_seats(structure, participants.len())?;
    if seats.is_empty() {
        return Err(TournamentError::EmptyStructure);
    }
    let dist = distance_matrix(structure, &seats);
    let mut open: Vec<usize> = seats.iter().map(|s| s.capacity).collect();
    let mut rng = rand::thread_rng();

    // Manual pre-assignments first, bypassing cost evaluation.
    let mut placements: Vec<Placement> = Vec::with_capacity(participants.len());
    let mut to_seed: Vec<Participant> = Vec::new();
    for p in participants {
        match seat_for_hint(&seats, &open, p.pre_assignment.as_ref()) {
            Some(seat) => {
                open[seat] -= 1;
                placements.push(Placement {
                    participant: p.clone(),
                    seat,
                    pinned: true,
                });
            }
            None => to_seed.push(p.clone()),
        }
    }

    to_seed.shuffle(&mut rng);

    let mut unassigned = Vec::new();
    for p in to_seed {
        let mut best_cost = f64::INFINITY;
        let mut best: Vec<usize> = Vec::new();
        for si in 0..seats.len() {
            if open[si] == 0 {
                continue;
            }
            let cost = seat_cost(&p, si, &placements, &dist);
            if cost < best_cost - COST_EPS {
                best_cost = cost;
                best = vec![si];
            } else if (cost - best_cost).abs() <= COST_EPS {
                best.push(si);
            }
        }
        match best.choose(&mut rng) {
            Some(&si) => {
                open[si] -= 1;
                placements.push(Placement {
                    participant: p,
                    seat: si,
                    pinned: false,
                });
            }
            None => unassigned.push(p),
        }
    }

    let swaps = refine_placements(&mut placements, &dist);
    log::debug!(
        "seeded {} participants over {} seats ({} swap improvements, {} left over)",
        placements.len(),
        seats.len(),
        swaps,
        unassigned.len()
    );

    let assigned = keyed_assignment(&seats, &placements);
    load_participants(structure, &assigned)?;
    Ok(SlotAssignment {
        assigned,
        unassigned,
    })
}

/// Seat index matching a pre-assignment hint, if it names a live seat with
/// remaining capacity. Unknown hints fall back to cost seeding.
fn seat_for_hint(seats: &[Seat], open: &[usize], hint: Option<&PreAssignment>) -> Option<usize> {
    let wanted = match hint {
        Some(PreAssignment::Slot(name)) => (name, false),
        Some(PreAssignment::Pool(name)) => (name, true),
        None => return None,
    };
    let found = seats
        .iter()
        .position(|s| s.is_pool == wanted.1 && &s.key == wanted.0);
    match found {
        Some(si) if open[si] > 0 => Some(si),
        _ => {
            log::warn!("pre-assignment {:?} names no open seat; cost-seeding instead", wanted.0);
            None
        }
    }
}

/// Starting seats for the structure's mode. In pure KO mode, bye-receiving
/// white slots are reserved up front (evenly spread) and never offered.
fn build_seats(
    structure: &TournamentStructure,
    num_participants: usize,
) -> Result<Vec<Seat>, TournamentError> {
    match structure.config.mode {
        CategoryMode::Knockout => {
            let bracket = structure
                .bracket
                .as_ref()
                .ok_or(TournamentError::EmptyStructure)?;
            let slots = bracket.first_round().len() * 2;
            let num_byes = slots
                .saturating_sub(num_participants)
                .min(slots / 2);
            let whites: Vec<usize> = (0..bracket.first_round().len()).collect();
            let mut reserved = Vec::new();
            reserve_byes(&whites, num_byes, &mut reserved);

            let mut seats = Vec::new();
            for (pos, &id) in bracket.first_round().iter().enumerate() {
                for side in [Side::Red, Side::White] {
                    if side == Side::White && reserved.contains(&pos) {
                        continue;
                    }
                    if let Some(name) = bracket.node(id).slot(side).name() {
                        seats.push(Seat {
                            key: name.to_string(),
                            capacity: 1,
                            anchor: Some((id, side)),
                            is_pool: false,
                        });
                    }
                }
            }
            Ok(seats)
        }
        CategoryMode::Pool | CategoryMode::Combined => {
            let k = structure.pools.len();
            if k == 0 {
                return Err(TournamentError::EmptyStructure);
            }
            let base = num_participants / k;
            let rem = num_participants % k;
            let mut seats = Vec::new();
            for (i, pool) in structure.pools.iter().enumerate() {
                seats.push(Seat {
                    key: pool.name.clone(),
                    capacity: base + usize::from(i < rem),
                    anchor: pool_anchor(structure, &pool.name),
                    is_pool: true,
                });
            }
            Ok(seats)
        }
    }
}

/// The first-round bracket position holding the pool's rank-1 winner slot
/// (combined mode); pure pool mode has no bracket and no anchor.
fn pool_anchor(structure: &TournamentStructure, pool: &str) -> Option<(NodeId, Side)> {
    let bracket = structure.bracket.as_ref()?;
    for &id in bracket.first_round() {
        for side in [Side::Red, Side::White] {
            if let MatchSlot::PoolWinner { pool: p, rank: 1 } = bracket.node(id).slot(side) {
                if p == pool {
                    return Some((id, side));
                }
            }
        }
    }
    None
}

/// Spread `num_byes` reserved positions over the ordered white-slot list by
/// recursive halving: each chunk contributes its first position.
fn reserve_byes(positions: &[usize], num_byes: usize, out: &mut Vec<usize>) {
    if num_byes == 0 || positions.is_empty() {
        return;
    }
    if num_byes == 1 {
        out.push(positions[0]);
        return;
    }
    let mid = positions.len() / 2;
    let left = num_byes.div_ceil(2);
    reserve_byes(&positions[..mid], left, out);
    reserve_byes(&positions[mid..], num_byes - left, out);
}

/// Pairwise seat distances: tree edges from the seats' anchor slots to their
/// lowest common ancestor, from one breadth-first path-recording traversal.
/// Identical seats are distance 0; anchorless seats (pure pools) are 1 apart.
fn distance_matrix(structure: &TournamentStructure, seats: &[Seat]) -> Vec<Vec<u32>> {
    let paths = structure
        .bracket
        .as_ref()
        .map(|b| b.paths_from_root())
        .unwrap_or_default();
    let mut dist = vec![vec![0u32; seats.len()]; seats.len()];
    for i in 0..seats.len() {
        for j in 0..seats.len() {
            if i == j {
                continue;
            }
            dist[i][j] = match (&seats[i].anchor, &seats[j].anchor) {
                (Some(a), Some(b)) if a == b => 0,
                (Some((na, _)), Some((nb, _))) => {
                    let (pa, pb) = (&paths[*na], &paths[*nb]);
                    let common = pa.iter().zip(pb.iter()).take_while(|(x, y)| x == y).count();
                    (pa.len() + 1 - common) as u32
                }
                _ => 1,
            };
        }
    }
    dist
}

fn inverse_distance(d: u32) -> f64 {
    if d == 0 {
        NO_DISTANCE_PENALTY
    } else {
        1.0 / d as f64
    }
}

/// Cost of placing `p` at `seat` against the current placements: a general
/// proximity penalty per already-placed participant, weighted up for shared
/// clubs.
fn seat_cost(p: &Participant, seat: usize, placements: &[Placement], dist: &[Vec<u32>]) -> f64 {
    placements
        .iter()
        .map(|other| {
            let inv = inverse_distance(dist[seat][other.seat]);
            if p.same_club(&other.participant) {
                inv + CLUB_WEIGHT * inv
            } else {
                inv
            }
        })
        .sum()
}

fn placement_cost(idx: usize, placements: &[Placement], dist: &[Vec<u32>]) -> f64 {
    let p = &placements[idx];
    placements
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != idx)
        .map(|(_, other)| {
            let inv = inverse_distance(dist[p.seat][other.seat]);
            if p.participant.same_club(&other.participant) {
                inv + CLUB_WEIGHT * inv
            } else {
                inv
            }
        })
        .sum()
}

/// One best-improvement pass: placements in descending cost order each try
/// every pairwise swap with another unpinned placement and take the best
/// strictly-improving one.
fn refine_placements(placements: &mut [Placement], dist: &[Vec<u32>]) -> usize {
    let mut order: Vec<usize> = (0..placements.len())
        .filter(|&i| !placements[i].pinned)
        .collect();
    order.sort_by(|&a, &b| {
        placement_cost(b, placements, dist)
            .partial_cmp(&placement_cost(a, placements, dist))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut swaps = 0;
    for &i in &order {
        let mut best: Option<(usize, f64)> = None;
        for j in 0..placements.len() {
            if j == i || placements[j].pinned || placements[i].seat == placements[j].seat {
                continue;
            }
            let before = placement_cost(i, placements, dist) + placement_cost(j, placements, dist);
            swap_seats(placements, i, j);
            let after = placement_cost(i, placements, dist) + placement_cost(j, placements, dist);
            swap_seats(placements, i, j);
            let gain = before - after;
            if gain > COST_EPS && best.map_or(true, |(_, g)| gain > g) {
                best = Some((j, gain));
            }
        }
        if let Some((j, _)) = best {
            swap_seats(placements, i, j);
            swaps += 1;
        }
    }
    swaps
}

fn swap_seats(placements: &mut [Placement], i: usize, j: usize) {
    let tmp = placements[i].seat;
    placements[i].seat = placements[j].seat;
    placements[j].seat = tmp;
}

/// Final slot-name keys: KO seats use the raw slot name; pool seats get an
/// instance suffix (`pool.index`) to keep keys unique.
fn keyed_assignment(seats: &[Seat], placements: &[Placement]) -> HashMap<String, Participant> {
    let mut counters: HashMap<usize, usize> = HashMap::new();
    let mut assigned = HashMap::with_capacity(placements.len());
    for pl in placements {
        let seat = &seats[pl.seat];
        let key = if seat.is_pool {
            let n = counters.entry(pl.seat).or_insert(0);
            let key = format!("{}.{}", seat.key, n);
            *n += 1;
            key
        } else {
            seat.key.clone()
        };
        assigned.insert(key, pl.participant.clone());
    }
    assigned
}
