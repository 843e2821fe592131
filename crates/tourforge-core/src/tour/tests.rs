//! Tests for tour representations.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::clustering::Clustering;
use crate::graph::{MatrixGraph, Norm, PointGraph};
use crate::validate::random_permutation;

fn unit_circle() -> PointGraph<f64> {
    PointGraph::from_points(
        &[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]],
        Norm::Euclidean,
    )
    .unwrap()
}

fn random_points(n: usize, seed: u64) -> PointGraph<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let coords = (0..2 * n).map(|_| rng.random_range(0.0..100.0)).collect();
    PointGraph::new(2, coords, Norm::Euclidean).unwrap()
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn test_permutations_are_hamiltonian() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for n in [1, 2, 5, 17] {
        let seq = random_permutation(n, &mut rng);

        let array = ArrayTour::new(seq.clone()).unwrap();
        let linked = LinkedTour::new(seq).unwrap();

        for tour in [&array as &dyn CyclicTour, &linked] {
            assert!(tour.is_hamiltonian());
            assert!(tour.has_no_revisit());
            assert!(tour.all_elements_valid());
            assert_eq!(tour.len(), n);
            assert_eq!(tour.max_len(), n);
        }
    }
}

#[test]
fn test_duplicate_vertex_rejected() {
    let expected = TourForgeError::Duplicate {
        what: "tour",
        entry: "vertex",
        value: 2,
        first: 1,
        second: 3,
    };
    assert_eq!(ArrayTour::new(vec![0, 2, 1, 2]).unwrap_err(), expected);
    assert_eq!(LinkedTour::new(vec![0, 2, 1, 2]).unwrap_err(), expected);
}

#[test]
fn test_out_of_range_vertex_rejected() {
    let expected = TourForgeError::OutOfRange {
        what: "tour",
        entry: "vertex",
        position: 1,
        value: 7,
        max: 3,
    };
    assert_eq!(ArrayTour::new(vec![0, 7, 1, 2]).unwrap_err(), expected);
    assert_eq!(LinkedTour::new(vec![0, 7, 1, 2]).unwrap_err(), expected);
}

#[test]
fn test_length_mismatch_rejected() {
    let err = ArrayTour::hamiltonian(vec![0, 1, 2], 4).unwrap_err();
    assert!(matches!(err, TourForgeError::LengthMismatch { expected: 4, actual: 3, .. }));

    assert!(ArrayTour::new(vec![]).is_err());
    assert!(LinkedTour::partial(&[0, 1, 2], 2).is_err());
}

#[test]
fn test_next_and_depot() {
    let array = ArrayTour::new(vec![2, 0, 3, 1]).unwrap();
    let linked = LinkedTour::from(&array);

    for tour in [&array as &dyn CyclicTour, &linked] {
        assert_eq!(tour.depot(), 2);
        assert_eq!(tour.next(2), 0);
        assert_eq!(tour.next(1), 2);
        assert_eq!(tour.to_sequence(), vec![2, 0, 3, 1]);
        assert_eq!(tour.walk_from(3).collect::<Vec<_>>(), vec![3, 1, 2, 0]);
    }
    assert_eq!(linked.prev(2), 1);
}

#[test]
fn test_step_queries() {
    let tour = LinkedTour::new(vec![0, 1, 2, 3, 4]).unwrap();

    assert!(tour.is_one_step_ahead(4, 0));
    assert!(tour.is_two_steps_ahead(4, 1));
    assert!(!tour.is_two_plus_steps_ahead(4, 0));
    assert!(!tour.is_two_plus_steps_ahead(2, 2));
    assert!(tour.is_two_plus_steps_ahead(1, 3));
    assert_eq!(tour.steps_ahead(3, 1), Some(3));
    assert_eq!(tour.steps_ahead(3, 3), Some(0));
}

#[test]
fn test_partial_tours() {
    let array = ArrayTour::partial(vec![4, 1, 6], 8).unwrap();
    let linked = LinkedTour::partial(&[4, 1, 6], 8).unwrap();

    for tour in [&array as &dyn CyclicTour, &linked] {
        assert_eq!(tour.len(), 3);
        assert_eq!(tour.max_len(), 8);
        assert!(!tour.is_hamiltonian());
        assert!(tour.has_no_revisit());
        assert!(tour.contains(6));
        assert!(!tour.contains(0));
        assert_eq!(tour.try_next(6).unwrap(), 4);
        assert!(matches!(
            tour.try_next(0),
            Err(TourForgeError::InvalidOperation(_))
        ));
    }
    assert_eq!(linked.steps_ahead(4, 0), None);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "vertex 0 is not in the tour")]
fn test_array_next_outside_tour_panics_in_debug() {
    let tour = ArrayTour::partial(vec![4, 1, 6], 8).unwrap();
    let _ = tour.next(0);
}

#[test]
fn test_eval_tour_on_integer_matrix() {
    let g = MatrixGraph::from_rows(vec![vec![0, 2, 9], vec![1, 0, 6], vec![7, 3, 5]], false)
        .unwrap();

    let array = ArrayTour::new(vec![0, 1, 2]).unwrap();
    let linked = LinkedTour::new(vec![0, 1, 2]).unwrap();
    assert_eq!(eval_tour(&array, &g), 15i64);
    assert_eq!(eval_tour(&linked, &g), 15i64);
    assert_eq!(array.cost(&g), 15i64);

    let single = ArrayTour::partial(vec![2], 3).unwrap();
    assert_eq!(eval_tour(&single, &g), 5i64);
}

#[test]
fn test_unit_circle_uncrossing() {
    let g = unit_circle();
    let mut array = ArrayTour::new(vec![2, 0, 3, 1]).unwrap();
    let mut linked = LinkedTour::from(&array);

    let before = eval_tour(&array, &g);
    assert_close(before, 2.0 * 2f64.sqrt() + 4.0);

    array.exchange_two_edges(3, 2, true).unwrap();
    linked.exchange_two_edges(3, 2, true).unwrap();

    assert_eq!(linked.to_sequence(), vec![2, 1, 0, 3]);
    assert_eq!(array.as_slice(), &[1, 0, 3, 2]);
    assert_close(eval_tour(&linked, &g), 4.0 * 2f64.sqrt());
    assert_close(array.cost(&g), 4.0 * 2f64.sqrt());
}

#[test]
fn test_exchange_rejects_adjacent_vertices() {
    let mut array = ArrayTour::new(vec![0, 1, 2, 3, 4]).unwrap();
    let mut linked = LinkedTour::new(vec![0, 1, 2, 3, 4]).unwrap();

    for tour in [&mut array as &mut dyn CyclicTour, &mut linked] {
        // C == B
        assert!(tour.exchange_two_edges(1, 2, true).is_err());
        // D == A
        assert!(tour.exchange_two_edges(1, 0, true).is_err());
        // C == A
        assert!(tour.exchange_two_edges(3, 3, false).is_err());
        // C not in tour
        assert!(tour.exchange_two_edges(1, 9, true).is_err());
        assert_eq!(tour.to_sequence(), vec![0, 1, 2, 3, 4]);
    }
}

#[test]
fn test_rank_based_exchange_bounds() {
    let mut tour = ArrayTour::new(vec![0, 1, 2, 3, 4, 5]).unwrap();

    assert!(tour.exchange_two_edges_by_rank(2, 3, true).is_err());
    assert!(tour.exchange_two_edges_by_rank(2, 7, true).is_err());
    assert!(tour.exchange_two_edges_by_rank(6, 8, true).is_err());

    // A at rank 4, C at rank 6 == rank 0 after wrapping: reverses ranks 5..=0.
    tour.exchange_two_edges_by_rank(4, 6, true).unwrap();
    assert_eq!(tour.as_slice(), &[5, 1, 2, 3, 4, 0]);
}

#[test]
fn test_exchange_changes_cost_by_gain() {
    let g = random_points(12, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    for strict in [true, false] {
        let mut array = ArrayTour::new(random_permutation(12, &mut rng)).unwrap();
        let mut linked = LinkedTour::from(&array);

        for _ in 0..200 {
            let a = rng.random_range(0..12);
            let c = rng.random_range(0..12);

            for tour in [&mut array as &mut dyn CyclicTour, &mut linked] {
                if !tour.is_two_plus_steps_ahead(a, c) || !tour.is_two_plus_steps_ahead(c, a) {
                    assert!(tour.exchange_two_edges(a, c, strict).is_err());
                    continue;
                }
                let b = tour.next(a);
                let d = tour.next(c);
                let gain = two_opt_gain(&g, a, b, c, d);
                let before = eval_tour(&*tour, &g);

                tour.exchange_two_edges(a, c, strict).unwrap();

                assert_close(before - eval_tour(&*tour, &g), gain);
                assert!(tour.is_hamiltonian());
            }
        }
    }
}

#[test]
fn test_strict_exchange_agrees_across_representations() {
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let n = 15;
    let mut array = ArrayTour::new(random_permutation(n, &mut rng)).unwrap();
    let mut linked = LinkedTour::from(&array);

    for _ in 0..100 {
        let a = rng.random_range(0..n);
        let c = rng.random_range(0..n);
        if !array.is_two_plus_steps_ahead(a, c) || !array.is_two_plus_steps_ahead(c, a) {
            continue;
        }

        array.exchange_two_edges(a, c, true).unwrap();
        linked.exchange_two_edges(a, c, true).unwrap();

        for v in 0..n {
            assert_eq!(array.next(v), linked.next(v), "successor of {v}");
        }
    }
}

#[test]
fn test_non_strict_exchange_reverses_shorter_arc() {
    let seq: Vec<usize> = (0..10).collect();
    let mut linked = LinkedTour::new(seq.clone()).unwrap();
    let mut array = ArrayTour::new(seq).unwrap();

    // B..C = 2..=8 is long; the outer arc 9..=1 gets reversed instead.
    linked.exchange_two_edges(1, 8, false).unwrap();
    array.exchange_two_edges(1, 8, false).unwrap();

    assert_eq!(linked.to_sequence(), vec![0, 9, 2, 3, 4, 5, 6, 7, 8, 1]);
    assert_eq!(array.as_slice(), &[0, 9, 2, 3, 4, 5, 6, 7, 8, 1]);
    assert_eq!(linked.next(8), 1);
    assert_eq!(linked.next(9), 2);
}

#[test]
fn test_array_cost_matches_generic_evaluation() {
    let g = random_points(9, 8);
    let tour = ArrayTour::new(vec![4, 2, 7, 0, 8, 1, 3, 6, 5]).unwrap();
    let linked = LinkedTour::from(&tour);

    assert_close(tour.cost(&g), eval_tour(&tour, &g));
    assert_close(tour.cost(&g), eval_tour(&linked, &g));
}

fn clustered_line() -> (PointGraph<f64>, Arc<Clustering>) {
    let clustering = Arc::new(Clustering::from_sizes(&[2, 3, 1]).unwrap());
    let points: Vec<[f64; 1]> = (0..6).map(|x| [x as f64]).collect();
    let g = PointGraph::from_points(&points, Norm::Euclidean)
        .unwrap()
        .with_clustering(Arc::clone(&clustering))
        .unwrap();
    (g, clustering)
}

#[test]
fn test_generalized_tour_tracks_clusters() {
    let (g, clustering) = clustered_line();
    let mut tour = GeneralizedTour::from_permutation(vec![4, 5, 0], clustering).unwrap();

    assert_eq!(tour.len(), 3);
    assert_eq!(tour.cluster_sequence(), &[1, 2, 0]);
    assert_eq!(tour.cluster_at(4), 2);
    assert_eq!(tour.cluster_rank(0), Some(2));
    assert_eq!(tour.vertex_of_cluster(1), Some(4));
    assert_close(tour.eval_cost(&g).unwrap(), 10.0);
    assert_eq!(tour.cost(), Some(10.0));

    tour.tour_mut().sequence_mut().swap(0, 2);
    tour.refresh_cluster_sequence().unwrap();
    assert_eq!(tour.cluster_sequence(), &[0, 2, 1]);
    assert_eq!(tour.cost(), None);
}

#[test]
fn test_generalized_tour_rejects_repeated_cluster() {
    let (_, clustering) = clustered_line();
    let err = GeneralizedTour::<f64>::from_permutation(vec![0, 2, 1], clustering).unwrap_err();

    assert_eq!(
        err,
        TourForgeError::Duplicate {
            what: "generalized tour",
            entry: "cluster",
            value: 0,
            first: 0,
            second: 2,
        }
    );
}

#[test]
fn test_generalized_tour_rejects_wrong_length() {
    let (_, clustering) = clustered_line();

    let err = GeneralizedTour::<f64>::from_permutation(vec![0, 2], Arc::clone(&clustering))
        .unwrap_err();
    assert!(matches!(err, TourForgeError::LengthMismatch { expected: 3, actual: 2, .. }));

    let wrong_universe = ArrayTour::partial(vec![0, 2, 5], 7).unwrap();
    assert!(GeneralizedTour::<f64>::new(wrong_universe, clustering).is_err());
}

#[test]
fn test_generalized_tour_rejects_foreign_clustering() {
    let (_, clustering) = clustered_line();
    let other = Arc::new(Clustering::from_sizes(&[3, 2, 1]).unwrap());
    let g = PointGraph::from_points(&[[0.0], [1.0], [2.0], [3.0], [4.0], [5.0]], Norm::Euclidean)
        .unwrap();

    let mut tour = GeneralizedTour::from_permutation(vec![0, 2, 5], clustering).unwrap();
    assert!(tour.eval_cost(&g).is_err());

    let g = g.with_clustering(other).unwrap();
    assert!(matches!(
        tour.eval_cost(&g),
        Err(TourForgeError::InvalidArgument(_))
    ));
}
