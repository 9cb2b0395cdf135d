//! Pool standings and decision rounds.

use combat_tournament_core::logic::generate_pool_matches;
use combat_tournament_core::{
    derive_ranking, generate_decision_round, needs_decision_round, pool_ranking,
    KendoMatchPointHandler, MatchNode, MatchPoint, MatchRecord, MatchSlot, Participant, Pool,
    TournamentError,
};

fn scored_match(
    name: &str,
    red: &Participant,
    white: &Participant,
    winner: &Participant,
    points: &[(&Participant, u32)],
) -> MatchNode {
    let mut m = MatchNode::new(
        name,
        MatchSlot::fixed(red.clone()),
        MatchSlot::fixed(white.clone()),
    )
    .unwrap();
    let mut rec = MatchRecord::new(red.id, white.id);
    rec.winner = Some(winner.id);
    for (p, n) in points {
        for _ in 0..*n {
            rec.points.push(MatchPoint::new(p.id, 'M'));
        }
    }
    m.record = Some(rec);
    m
}

#[test]
fn ranking_orders_by_wins_then_points() {
    let handler = KendoMatchPointHandler::default();
    let a = Participant::new("A");
    let b = Participant::new("B");
    let c = Participant::new("C");
    // Wins A:2 B:1 C:1; points A:3 B:4 C:2.
    let matches = vec![
        scored_match("1", &a, &b, &a, &[(&a, 2), (&b, 1)]),
        scored_match("2", &a, &c, &a, &[(&a, 1), (&c, 1)]),
        scored_match("3", &b, &c, &b, &[(&b, 2), (&c, 1)]),
        scored_match("4", &b, &c, &c, &[(&b, 1)]),
    ];
    let ranking = derive_ranking(
        &matches,
        &[a.clone(), b.clone(), c.clone()],
        &handler,
    );
    assert_eq!(ranking[0].participant.id, a.id);
    assert_eq!(ranking[0].rank, 1);
    assert_eq!((ranking[0].wins, ranking[0].points), (2, 3));
    assert_eq!(ranking[1].participant.id, b.id);
    assert_eq!(ranking[1].rank, 2);
    assert_eq!(ranking[2].participant.id, c.id);
    assert_eq!(ranking[2].rank, 3);
}

#[test]
fn tied_entries_share_a_rank_and_the_next_one_skips() {
    let handler = KendoMatchPointHandler::default();
    let a = Participant::new("A");
    let b = Participant::new("B");
    let c = Participant::new("C");
    // A and B both 1 win / 1 point, C none.
    let matches = vec![
        scored_match("1", &a, &c, &a, &[(&a, 1)]),
        scored_match("2", &b, &c, &b, &[(&b, 1)]),
    ];
    let ranking = derive_ranking(&matches, &[a, b, c.clone()], &handler);
    assert_eq!(ranking[0].rank, 1);
    assert_eq!(ranking[1].rank, 1);
    assert_eq!(ranking[2].participant.id, c.id);
    assert_eq!(ranking[2].rank, 3);
}

/// A three-way pool where everyone beats exactly one opponent 1:0.
fn circular_pool() -> (Pool, Vec<Participant>) {
    let a = Participant::new("A");
    let b = Participant::new("B");
    let c = Participant::new("C");
    let mut pool = Pool::new("P1");
    pool.participants = vec![a.clone(), b.clone(), c.clone()];
    pool.matches = vec![
        scored_match("P1-1", &a, &b, &a, &[(&a, 1)]),
        scored_match("P1-2", &a, &c, &c, &[(&c, 1)]),
        scored_match("P1-3", &b, &c, &b, &[(&b, 1)]),
    ];
    (pool, vec![a, b, c])
}

#[test]
fn decision_round_is_generated_for_a_circular_tie() {
    let handler = KendoMatchPointHandler::default();
    let (mut pool, _) = circular_pool();
    assert!(needs_decision_round(&mut pool, 1, &handler).unwrap());

    let added = generate_decision_round(&mut pool, 1, &handler).unwrap();
    assert_eq!(added, 3);
    assert_eq!(pool.matches.len(), 6);
    for m in &pool.matches[3..] {
        assert!(m.tie_break);
        assert!(m.name.starts_with("P1-"));
    }
}

#[test]
fn decision_round_requires_an_actual_tie() {
    let handler = KendoMatchPointHandler::default();
    let a = Participant::new("A");
    let b = Participant::new("B");
    let c = Participant::new("C");
    let mut pool = Pool::new("P1");
    pool.participants = vec![a.clone(), b.clone(), c.clone()];
    pool.matches = vec![
        scored_match("P1-1", &a, &b, &a, &[(&a, 2)]),
        scored_match("P1-2", &a, &c, &a, &[(&a, 2)]),
        scored_match("P1-3", &b, &c, &b, &[(&b, 1)]),
    ];
    assert!(!needs_decision_round(&mut pool, 1, &handler).unwrap());
    assert!(matches!(
        generate_decision_round(&mut pool, 1, &handler),
        Err(TournamentError::NoTieToBreak(_))
    ));
}

#[test]
fn incomplete_pool_refuses_decision_round() {
    let handler = KendoMatchPointHandler::default();
    let (mut pool, _) = circular_pool();
    pool.matches[2].record = None;
    assert!(matches!(
        needs_decision_round(&mut pool, 1, &handler),
        Err(TournamentError::PoolNotComplete(_))
    ));
}

#[test]
fn ranking_cache_follows_the_version_counter() {
    let handler = KendoMatchPointHandler::default();
    let (mut pool, participants) = circular_pool();
    let first = pool_ranking(&mut pool, &handler);
    assert_eq!(first.len(), 3);

    // Flip one result through the pool API; the version bump invalidates
    // the cached standings.
    let b = participants[1].clone();
    let c = participants[2].clone();
    let mut rec = MatchRecord::new(b.id, c.id);
    rec.winner = Some(c.id);
    rec.points.push(MatchPoint::new(c.id, 'M'));
    rec.points.push(MatchPoint::new(c.id, 'K'));
    pool.matches[2].record = Some(rec);
    pool.bump_version();

    let second = pool_ranking(&mut pool, &handler);
    assert_ne!(first, second);
    assert_eq!(second[0].participant.id, c.id);
}

#[test]
fn pool_matches_follow_the_round_robin_tables() {
    let participants: Vec<Participant> = ["A", "B", "C", "D"]
        .iter()
        .map(|n| Participant::new(*n))
        .collect();
    let matches = generate_pool_matches("P2", &participants, 0).unwrap();
    assert_eq!(matches.len(), 6);
    assert_eq!(matches[0].name, "P2-1");
    assert_eq!(matches[5].name, "P2-6");
    // Fixed 4-table: first pairing is A-B, second C-D.
    assert_eq!(matches[0].red.participant().unwrap().name, "A");
    assert_eq!(matches[1].red.participant().unwrap().name, "C");
}
