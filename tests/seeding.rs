//! Seeding: bye placement, pool spreading, club separation, pre-assignments.

use combat_tournament_core::{
    generate_structure, populate_structure, CategoryConfig, Participant, PreAssignment, Side,
    TournamentError,
};

fn field(n: usize) -> Vec<Participant> {
    (0..n).map(|i| Participant::new(format!("F{i}"))).collect()
}

/// Every empty first-round slot after pure-KO seeding must be a white slot.
fn assert_byes_are_white(structure: &combat_tournament_core::TournamentStructure) {
    let bracket = structure.bracket.as_ref().expect("KO structure");
    for &id in bracket.first_round() {
        let m = bracket.node(id);
        assert!(
            m.slot(Side::Red).participant().is_some(),
            "match {} received a bye on the red side",
            m.name
        );
    }
}

#[test]
fn byes_land_in_white_slots_for_4_participants() {
    let config = CategoryConfig::knockout(3);
    let mut structure = generate_structure(&config, 4).unwrap();
    let assignment = populate_structure(&mut structure, &field(4)).unwrap();
    assert_eq!(assignment.assigned.len(), 4);
    assert!(assignment.unassigned.is_empty());
    assert_byes_are_white(&structure);

    // 8 slots, 4 participants: every match is participant-vs-bye.
    let bracket = structure.bracket.as_ref().unwrap();
    for &id in bracket.first_round() {
        assert!(bracket.node(id).slot(Side::White).participant().is_none());
    }
}

#[test]
fn byes_land_in_white_slots_for_14_participants() {
    // 14 participants grow a 3-round configuration to 4 rounds (16 slots).
    let config = CategoryConfig::knockout(3);
    let mut structure = generate_structure(&config, 14).unwrap();
    let assignment = populate_structure(&mut structure, &field(14)).unwrap();
    assert_eq!(assignment.assigned.len(), 14);
    let bracket = structure.bracket.as_ref().unwrap();
    assert_eq!(bracket.num_rounds(), 4);
    assert_byes_are_white(&structure);

    let empty: usize = bracket
        .first_round()
        .iter()
        .map(|&id| {
            let m = bracket.node(id);
            usize::from(m.slot(Side::Red).participant().is_none())
                + usize::from(m.slot(Side::White).participant().is_none())
        })
        .sum();
    assert_eq!(empty, 2);
}

#[test]
fn combined_18_participants_yield_4_pools_sized_5_5_4_4() {
    let config = CategoryConfig::combined(3, 2);
    let mut structure = generate_structure(&config, 18).unwrap();
    assert_eq!(structure.pools.len(), 4);

    populate_structure(&mut structure, &field(18)).unwrap();
    let sizes: Vec<usize> = structure.pools.iter().map(|p| p.participants.len()).collect();
    assert_eq!(sizes, vec![5, 5, 4, 4]);
    for pool in &structure.pools {
        let n = pool.participants.len();
        assert_eq!(pool.matches.len(), n * (n - 1) / 2);
    }
}

#[test]
fn clubmates_end_up_in_different_matches() {
    let config = CategoryConfig::knockout(2);
    for _ in 0..20 {
        let mut structure = generate_structure(&config, 4).unwrap();
        let participants = vec![
            Participant::with_club("X1", "Shubukan"),
            Participant::new("A"),
            Participant::new("B"),
            Participant::with_club("X2", "Shubukan"),
        ];
        populate_structure(&mut structure, &participants).unwrap();
        let bracket = structure.bracket.as_ref().unwrap();
        for &id in bracket.first_round() {
            let m = bracket.node(id);
            let clubs: Vec<_> = [Side::Red, Side::White]
                .iter()
                .filter_map(|&s| m.slot(s).participant())
                .filter_map(|p| p.club.as_deref())
                .collect();
            assert!(
                clubs.len() < 2,
                "clubmates met in first-round match {}",
                m.name
            );
        }
    }
}

#[test]
fn pre_assigned_slot_is_honored() {
    let config = CategoryConfig::knockout(2);
    for _ in 0..10 {
        let mut structure = generate_structure(&config, 4).unwrap();
        let mut fixed = Participant::new("Fixed");
        fixed.pre_assignment = Some(PreAssignment::Slot("2.red".into()));
        let mut participants = field(3);
        participants.push(fixed.clone());

        let assignment = populate_structure(&mut structure, &participants).unwrap();
        assert_eq!(assignment.assigned.get("2.red").map(|p| p.id), Some(fixed.id));
    }
}

#[test]
fn pre_assigned_pool_is_honored() {
    let config = CategoryConfig::combined(3, 2);
    let mut structure = generate_structure(&config, 9).unwrap();
    let mut fixed = Participant::new("Fixed");
    fixed.pre_assignment = Some(PreAssignment::Pool("P3".into()));
    let mut participants = field(8);
    participants.push(fixed.clone());

    populate_structure(&mut structure, &participants).unwrap();
    let pool = structure.pool("P3").unwrap();
    assert!(pool.participants.iter().any(|p| p.id == fixed.id));
}

#[test]
fn overflow_participants_are_returned_unassigned() {
    let config = CategoryConfig::knockout(2);
    let mut structure = generate_structure(&config, 4).unwrap();
    // The bracket tops out at 2 rounds only if generation is told so; with
    // 6 participants the 4 slots (no byes) leave 2 unassigned.
    let assignment = populate_structure(&mut structure, &field(6)).unwrap();
    assert_eq!(assignment.assigned.len(), 4);
    assert_eq!(assignment.unassigned.len(), 2);
}

#[test]
fn populating_an_ungenerated_structure_fails() {
    let config = CategoryConfig::pools(5);
    let structure = combat_tournament_core::TournamentStructure {
        config,
        bracket: None,
        pools: Vec::new(),
    };
    let mut structure = structure;
    assert!(matches!(
        populate_structure(&mut structure, &field(4)),
        Err(TournamentError::EmptyStructure)
    ));
}
