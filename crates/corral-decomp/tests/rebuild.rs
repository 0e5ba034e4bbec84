//! Rebuild-level properties: partition completeness, determinism, and
//! permutation round trips over randomized particle clouds.

use corral_core::Periodicity;
use corral_decomp::{CellRange, DomainDecomposition, Position};
use indexmap::IndexSet;
use proptest::prelude::*;
use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_cloud(n: usize, span: f32, seed: u64) -> Vec<Position> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Position::new([
                rng.random_range(-span..2.0 * span),
                rng.random_range(-span..2.0 * span),
                rng.random_range(-span..2.0 * span),
            ])
        })
        .collect()
}

fn engine(box_edge: f32, cutoff: f32, n: usize, periodic: Periodicity) -> DomainDecomposition {
    let mut dd = DomainDecomposition::new(periodic);
    dd.set_box(Position::new([box_edge; 3])).unwrap();
    dd.set_cutoff(cutoff).unwrap();
    dd.set_n_part(n).unwrap();
    dd
}

/// Collect the particle indices of every cell range, asserting each
/// index appears exactly once across all cells.
fn ranged_indices(dd: &DomainDecomposition, xyz: &[Position]) -> IndexSet<u32> {
    let natural: Vec<u32> = (0..xyz.len() as u32).collect();
    let sorted = dd.sort(&natural).unwrap();
    let mut seen = IndexSet::new();
    for range in dd.cells() {
        for k in range.start..range.end {
            assert!(
                seen.insert(sorted[k as usize]),
                "particle {} appears in two ranges",
                sorted[k as usize]
            );
        }
    }
    seen
}

#[test]
fn partition_is_complete_on_a_periodic_box() {
    let xyz = random_cloud(500, 8.0, 42);
    let mut dd = engine(8.0, 1.0, 500, Periodicity::ALL);
    dd.build(&xyz).unwrap();

    // Positions outside the box wrap, so every particle owns a cell.
    assert_eq!(dd.n_out_of_box(), 0);
    let seen = ranged_indices(&dd, &xyz);
    assert_eq!(seen.len(), 500);
}

#[test]
fn partition_splits_into_ranged_and_out_of_box_on_a_bounded_box() {
    let xyz = random_cloud(300, 8.0, 7);
    let mut dd = engine(8.0, 2.0, 300, Periodicity::NONE);
    dd.build(&xyz).unwrap();

    let in_box = xyz
        .iter()
        .filter(|p| (0..3).all(|a| p[a] >= 0.0 && p[a] < 8.0))
        .count();
    assert_eq!(dd.n_out_of_box(), 300 - in_box);

    let seen = ranged_indices(&dd, &xyz);
    assert_eq!(seen.len(), in_box);
}

#[test]
fn ranges_are_contiguous_and_disjoint() {
    let xyz = random_cloud(200, 4.0, 3);
    let mut dd = engine(4.0, 1.0, 200, Periodicity::ALL);
    dd.build(&xyz).unwrap();

    let mut occupied: Vec<CellRange> = dd
        .cells()
        .iter()
        .copied()
        .filter(|r| !r.is_empty())
        .collect();
    occupied.sort_by_key(|r| r.start);
    let mut cursor = 0;
    for range in occupied {
        assert_eq!(range.start, cursor, "gap or overlap before {range:?}");
        cursor = range.end;
    }
    assert_eq!(cursor as usize, 200 - dd.n_out_of_box());
}

#[test]
fn rebuild_with_unchanged_input_is_identical() {
    let xyz = random_cloud(256, 6.0, 99);
    let mut dd = engine(6.0, 1.5, 256, Periodicity::ALL);
    dd.build(&xyz).unwrap();
    let cells_first: Vec<CellRange> = dd.cells().to_vec();
    let sorted_first: Vec<Position> = dd.sorted_positions().to_vec();

    dd.build(&xyz).unwrap();
    assert_eq!(dd.cells(), cells_first.as_slice());
    assert_eq!(dd.sorted_positions(), sorted_first.as_slice());
}

#[test]
fn same_cell_particles_keep_ascending_natural_order() {
    // Four particles in the same cell: the documented tie-break is
    // ascending original index.
    let xyz = vec![
        Position::new([0.1, 0.1, 0.1]),
        Position::new([0.2, 0.2, 0.2]),
        Position::new([0.3, 0.3, 0.3]),
        Position::new([0.4, 0.4, 0.4]),
    ];
    let mut dd = engine(4.0, 1.0, 4, Periodicity::ALL);
    dd.build(&xyz).unwrap();
    let natural: Vec<u32> = (0..4).collect();
    assert_eq!(dd.sort(&natural).unwrap(), natural);
}

#[test]
fn sort_then_unsort_is_identity_for_attribute_arrays() {
    let xyz = random_cloud(128, 5.0, 11);
    let mut dd = engine(5.0, 1.0, 128, Periodicity::ALL);
    dd.build(&xyz).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let forces: Vec<f32> = (0..128).map(|_| rng.random_range(-1.0..1.0)).collect();
    let round_tripped = dd.unsort(&dd.sort(&forces).unwrap()).unwrap();
    assert_eq!(round_tripped, forces);

    // And the sorted position array is the sort of the input.
    assert_eq!(dd.unsort(dd.sorted_positions()).unwrap(), xyz);
}

#[test]
fn sorted_positions_are_cell_contiguous() {
    let xyz = random_cloud(200, 8.0, 5);
    let mut dd = engine(8.0, 1.0, 200, Periodicity::ALL);
    dd.build(&xyz).unwrap();

    // Within each range, every sorted position re-hashes to that cell:
    // check via the per-axis coordinate of the wrapped position.
    let n = dd.n_cells();
    for (cell, range) in dd.cells().iter().enumerate() {
        for p in &dd.sorted_positions()[range.start as usize..range.end as usize] {
            let mut lin = 0u64;
            for a in 0..3 {
                let mut x = p[a];
                x -= (x / 8.0).floor() * 8.0;
                if x >= 8.0 {
                    x = 0.0;
                }
                let c = (((x / 8.0) * n[a] as f32) as i64).clamp(0, n[a] as i64 - 1) as u64;
                lin = c + lin * n[a] as u64;
            }
            assert_eq!(lin as usize, cell);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn completeness_holds_for_arbitrary_clouds(
        n in 1usize..200,
        seed in 0u64..1000,
        periodic in prop_oneof![Just(Periodicity::ALL), Just(Periodicity::NONE)],
    ) {
        let xyz = random_cloud(n, 4.0, seed);
        let mut dd = engine(4.0, 1.0, n, periodic);
        dd.build(&xyz).unwrap();
        let ranged: u32 = dd.cells().iter().map(|r| r.end - r.start).sum();
        prop_assert_eq!(ranged as usize + dd.n_out_of_box(), n);
    }

    #[test]
    fn unsort_inverts_sort_for_arbitrary_data(
        data in proptest::collection::vec(any::<u32>(), 1..100),
        seed in 0u64..1000,
    ) {
        let n = data.len();
        let xyz = random_cloud(n, 3.0, seed);
        let mut dd = engine(3.0, 1.0, n, Periodicity::ALL);
        dd.build(&xyz).unwrap();
        let round_tripped = dd.unsort(&dd.sort(&data).unwrap()).unwrap();
        prop_assert_eq!(round_tripped, data);
    }
}
