//! Area allocation across pools and bracket subtrees.

use combat_tournament_core::{
    assign_areas, generate_structure, populate_structure, Area, AreaId, CategoryConfig,
    Participant,
};
use std::collections::HashMap;

fn field(n: usize) -> Vec<Participant> {
    (0..n).map(|i| Participant::new(format!("F{i}"))).collect()
}

#[test]
fn pools_rotate_through_areas_in_creation_order() {
    let config = CategoryConfig::pools(2);
    let mut structure = generate_structure(&config, 8).unwrap();
    populate_structure(&mut structure, &field(8)).unwrap();
    assert_eq!(structure.pools.len(), 4);

    let areas = vec![Area::new("Area 1"), Area::new("Area 2")];
    assign_areas(&mut structure, &areas);

    for (i, pool) in structure.pools.iter().enumerate() {
        let expected = areas[i % 2].id;
        assert!(
            pool.matches.iter().all(|m| m.area == Some(expected)),
            "pool {} should sit entirely on one area",
            pool.name
        );
    }
}

#[test]
fn bracket_subtrees_stay_on_one_area() {
    let config = CategoryConfig::knockout(3);
    let mut structure = generate_structure(&config, 8).unwrap();
    populate_structure(&mut structure, &field(8)).unwrap();

    let areas = vec![Area::new("Area 1"), Area::new("Area 2")];
    assign_areas(&mut structure, &areas);

    // Two chunks below the final: each semi-final shares its area with both
    // of its quarter-finals.
    let bracket = structure.bracket.as_ref().unwrap();
    let rounds = bracket.rounds();
    let semis = &rounds[1];
    assert_eq!(semis.len(), 2);
    for &semi in semis {
        let area = bracket.node(semi).area;
        assert!(area.is_some());
        for child in bracket.children(semi) {
            assert_eq!(bracket.node(child).area, area);
        }
    }
    let a = bracket.node(semis[0]).area;
    let b = bracket.node(semis[1]).area;
    assert_ne!(a, b, "the two halves should go to different areas");
}

#[test]
fn area_usage_is_balanced_within_one_match() {
    let config = CategoryConfig::knockout(3);
    let mut structure = generate_structure(&config, 8).unwrap();
    populate_structure(&mut structure, &field(8)).unwrap();

    let areas = vec![Area::new("Area 1"), Area::new("Area 2")];
    assign_areas(&mut structure, &areas);

    let bracket = structure.bracket.as_ref().unwrap();
    let mut usage: HashMap<AreaId, usize> = HashMap::new();
    for id in 0..bracket.len() {
        let area = bracket.node(id).area.unwrap();
        *usage.entry(area).or_insert(0) += 1;
    }
    assert_eq!(usage.len(), 2);
    let counts: Vec<usize> = usage.values().copied().collect();
    assert!(counts.iter().max().unwrap() - counts.iter().min().unwrap() <= 1);
}

#[test]
fn combined_structure_splits_pools_and_bracket_together() {
    let config = CategoryConfig::combined(3, 2);
    let mut structure = generate_structure(&config, 18).unwrap();
    populate_structure(&mut structure, &field(18)).unwrap();

    let areas = vec![Area::new("Area 1"), Area::new("Area 2")];
    assign_areas(&mut structure, &areas);

    // 4 pools alternate over the two areas in creation order.
    assert_eq!(structure.pools.len(), 4);
    for (i, pool) in structure.pools.iter().enumerate() {
        let expected = areas[i % 2].id;
        assert!(pool.matches.iter().all(|m| m.area == Some(expected)));
    }

    // The 3-round winner bracket stays balanced within one match.
    let bracket = structure.bracket.as_ref().unwrap();
    let mut usage: HashMap<AreaId, usize> = HashMap::new();
    for id in 0..bracket.len() {
        let area = bracket.node(id).area.unwrap();
        *usage.entry(area).or_insert(0) += 1;
    }
    assert_eq!(usage.len(), 2);
    let counts: Vec<usize> = usage.values().copied().collect();
    assert!(counts.iter().max().unwrap() - counts.iter().min().unwrap() <= 1);
}

#[test]
fn no_areas_leaves_matches_unassigned() {
    let config = CategoryConfig::knockout(2);
    let mut structure = generate_structure(&config, 4).unwrap();
    populate_structure(&mut structure, &field(4)).unwrap();
    assign_areas(&mut structure, &[]);
    let bracket = structure.bracket.as_ref().unwrap();
    assert!((0..bracket.len()).all(|id| bracket.node(id).area.is_none()));
}

#[test]
fn cluster_factor_pushes_the_split_deeper() {
    // factor 2 with 2 areas makes 4 chunks, so the quarter-finals are the
    // chunk roots and the two last rounds are placed match-by-match.
    let mut config = CategoryConfig::knockout(3);
    config.cluster_factor = 2;
    let mut structure = generate_structure(&config, 8).unwrap();
    populate_structure(&mut structure, &field(8)).unwrap();

    let areas = vec![Area::new("Area 1"), Area::new("Area 2")];
    assign_areas(&mut structure, &areas);

    let bracket = structure.bracket.as_ref().unwrap();
    let rounds = bracket.rounds();
    let quarters = &rounds[0];
    let chunk_areas: Vec<Option<AreaId>> =
        quarters.iter().map(|&id| bracket.node(id).area).collect();
    assert_eq!(
        chunk_areas,
        vec![
            Some(areas[0].id),
            Some(areas[1].id),
            Some(areas[0].id),
            Some(areas[1].id)
        ]
    );
}
