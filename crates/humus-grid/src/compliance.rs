//! BoxGrid compliance test helpers.
//!
//! These functions verify that a grid satisfies the invariants every
//! scoreboard relies on. Reused across the grid test modules.

use crate::dimension::Face;
use crate::grid::BoxGrid;
use indexmap::IndexSet;

/// Assert that every index decodes to a coordinate that encodes back to it.
pub fn assert_index_round_trip(grid: &BoxGrid) {
    for index in grid.box_indices() {
        let coord = grid.coordinate(index).unwrap();
        assert_eq!(
            grid.box_index(coord).unwrap(),
            index,
            "round trip failed for {index} via {coord}"
        );
    }
}

/// Assert that the encoding is a bijection onto `[0, box_count)`.
pub fn assert_indices_unique_and_complete(grid: &BoxGrid) {
    let mut seen = IndexSet::new();
    for z in 1..=grid.num_z() {
        for y in 1..=grid.num_y() {
            for x in 1..=grid.num_x() {
                let index = grid
                    .box_index(humus_core::BoxCoordinate::new(x, y, z))
                    .unwrap();
                assert!(seen.insert(index), "duplicate index {index}");
            }
        }
    }
    assert_eq!(seen.len(), grid.box_count(), "encoding does not cover the grid");
}

/// Assert that crossing `face` and then `face.reverse()` returns home.
pub fn assert_neighbours_symmetric(grid: &BoxGrid) {
    for index in grid.box_indices() {
        for face in Face::ALL {
            if let Some((nb, _)) = grid.neighbour(index, face).unwrap() {
                let back = grid.neighbour(nb, face.reverse()).unwrap();
                assert_eq!(
                    back.map(|(b, _)| b),
                    Some(index),
                    "neighbour symmetry violated: {nb} across {face} from {index}"
                );
            }
        }
    }
}

/// Assert that every box centre resolves back to its own box.
pub fn assert_centres_resolve_home(grid: &BoxGrid) {
    for index in grid.box_indices() {
        let centre = grid.box_bounds(index).unwrap().centre();
        let (found, wrap) = grid.find_box_index(&centre).unwrap();
        assert_eq!(found, index, "centre {centre} resolved to {found}");
        assert!(wrap.is_none(), "centre lookup must not wrap");
    }
}

/// Assert that box volumes sum to the grid volume.
pub fn assert_volumes_sum_to_domain(grid: &BoxGrid) {
    let total: f64 = grid
        .box_indices()
        .map(|i| grid.box_volume(i).unwrap())
        .sum();
    let domain = grid.bounds().volume();
    assert!(
        (total - domain).abs() <= 1e-9 * domain.abs().max(1.0),
        "box volumes sum to {total}, domain volume is {domain}"
    );
}

/// Run all compliance checks on a grid.
pub fn run_full_compliance(grid: &BoxGrid) {
    assert_index_round_trip(grid);
    assert_indices_unique_and_complete(grid);
    assert_neighbours_symmetric(grid);
    assert_centres_resolve_home(grid);
    assert_volumes_sum_to_domain(grid);
}
