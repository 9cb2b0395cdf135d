//! Bracket construction: round sizes, naming, parent links, round queries.

use combat_tournament_core::logic::{build_bracket, build_with_first_round};
use combat_tournament_core::{MatchNode, MatchSlot, TournamentError};

#[test]
fn three_round_bracket_has_round_sizes_4_2_1() {
    let bracket = build_bracket(3).unwrap();
    let rounds = bracket.rounds();
    let sizes: Vec<usize> = rounds.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![4, 2, 1]);
    assert_eq!(bracket.num_rounds(), 3);
    assert_eq!(bracket.len(), 7);
}

#[test]
fn match_names_are_one_sequence_across_the_tree() {
    let bracket = build_bracket(3).unwrap();
    let rounds = bracket.rounds();
    let names: Vec<&str> = rounds
        .iter()
        .flatten()
        .map(|&id| bracket.node(id).name.as_str())
        .collect();
    assert_eq!(names, vec!["1", "2", "3", "4", "5", "6", "7"]);
}

#[test]
fn parent_links_mirror_winner_slots() {
    let bracket = build_bracket(3).unwrap();
    for &first in bracket.first_round() {
        let parent = bracket.parent(first).expect("first-round node has a parent");
        assert!(bracket.children(parent).contains(&first));
    }
    assert_eq!(bracket.parent(bracket.root()), None);
}

#[test]
fn first_round_slots_are_named() {
    let bracket = build_bracket(2).unwrap();
    assert!(bracket.find_slot("1.red").is_some());
    assert!(bracket.find_slot("2.white").is_some());
    assert!(bracket.find_slot("3.red").is_none());
}

#[test]
fn final_rounds_walks_down_from_the_root() {
    let bracket = build_bracket(4).unwrap();
    let last_two = bracket.final_rounds(2);
    assert_eq!(last_two.len(), 2);
    assert_eq!(last_two[0].len(), 2);
    assert_eq!(last_two[1], vec![bracket.root()]);
    assert!(bracket.final_rounds(0).is_empty());
}

#[test]
fn non_power_of_two_first_rounds_are_rejected() {
    let first: Vec<MatchNode> = (1..=3)
        .map(|i| {
            MatchNode::new(
                i.to_string(),
                MatchSlot::open(format!("{i}.red")),
                MatchSlot::open(format!("{i}.white")),
            )
            .unwrap()
        })
        .collect();
    assert!(matches!(
        build_with_first_round(first),
        Err(TournamentError::InvalidRounds)
    ));
    assert!(matches!(
        build_with_first_round(Vec::new()),
        Err(TournamentError::InvalidRounds)
    ));
}

#[test]
fn identical_slots_are_rejected() {
    assert!(matches!(
        MatchNode::new("1", MatchSlot::Bye, MatchSlot::Bye),
        Err(TournamentError::DuplicateSlot(_))
    ));
    let same = MatchSlot::open("1.red");
    assert!(matches!(
        MatchNode::new("1", same.clone(), same),
        Err(TournamentError::DuplicateSlot(_))
    ));
}
