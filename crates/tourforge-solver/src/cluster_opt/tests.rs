//! Tests for cluster optimization.

use std::sync::Arc;

use tourforge_core::{Clustering, GeneralizedTour, MatrixGraph, Norm, PointGraph, TourForgeError};
use tourforge_test::assert_cost_eq;
use tourforge_test::gtsp::{
    gtsp_clustering, gtsp_graph, gtsp_initial_tour, GTSP_OPTIMAL, GTSP_OPTIMAL_COST, GTSP_ORDER,
};
use tourforge_test::nine_point::nine_point_graph;

use super::*;

fn initial_tour() -> GeneralizedTour<f64> {
    GeneralizedTour::from_permutation(gtsp_initial_tour(), gtsp_clustering()).unwrap()
}

#[test]
fn test_optimum_for_every_cut_cluster() {
    let g = gtsp_graph();
    let tour = initial_tour();
    assert_eq!(tour.cluster_sequence(), &GTSP_ORDER);

    let mut optimizer = ClusterOptimizer::new();
    let mut out = Vec::new();
    for cut in 0..GTSP_ORDER.len() {
        let cost = optimizer.solve(&tour, &g, cut, &mut out).unwrap();
        assert_cost_eq(cost, GTSP_OPTIMAL_COST);
        assert_eq!(out, GTSP_OPTIMAL, "cut cluster {cut}");
    }
    assert_eq!(optimizer.stats().dp_solves, 6);
    assert_eq!(tour.tour().as_slice(), gtsp_initial_tour().as_slice());
}

#[test]
fn test_improve_in_place() {
    let g = gtsp_graph();
    let mut tour = initial_tour();

    let cost = ClusterOptimizer::new().improve(&mut tour, &g, None).unwrap();

    assert_cost_eq(cost, GTSP_OPTIMAL_COST);
    assert_eq!(tour.cost(), Some(cost));
    assert_eq!(tour.tour().as_slice(), &GTSP_OPTIMAL);
    assert_eq!(tour.cluster_sequence(), &GTSP_ORDER);
    assert_cost_eq(tour.eval_cost(&g).unwrap(), GTSP_OPTIMAL_COST);
}

#[test]
fn test_improve_is_stable_at_optimum() {
    let g = gtsp_graph();
    let mut tour = GeneralizedTour::from_permutation(GTSP_OPTIMAL.to_vec(), gtsp_clustering()).unwrap();

    let mut optimizer = ClusterOptimizer::new();
    for cut in [Some(0), Some(3), None] {
        let cost = optimizer.improve(&mut tour, &g, cut).unwrap();
        assert_cost_eq(cost, GTSP_OPTIMAL_COST);
        assert_eq!(tour.tour().as_slice(), &GTSP_OPTIMAL);
    }
}

#[test]
fn test_rejects_unclustered_graph() {
    let tour = initial_tour();
    let g = PointGraph::from_points(&vec![[0.0, 0.0]; 36], Norm::Euclidean).unwrap();

    let mut out = vec![7];
    let err = ClusterOptimizer::new().solve(&tour, &g, 0, &mut out).unwrap_err();
    assert!(matches!(err, TourForgeError::InvalidArgument(_)));
    assert_eq!(out, vec![7]);
}

#[test]
fn test_rejects_different_clustering() {
    let mut tour = initial_tour();
    let other = Arc::new(Clustering::from_sizes(&[6, 6, 6, 6, 6, 6]).unwrap());
    let g = PointGraph::from_points(&vec![[0.0, 0.0]; 36], Norm::Euclidean)
        .unwrap()
        .with_clustering(other)
        .unwrap();

    let err = ClusterOptimizer::new().improve(&mut tour, &g, None).unwrap_err();
    assert!(matches!(err, TourForgeError::InvalidArgument(_)));
    assert_eq!(tour.tour().as_slice(), gtsp_initial_tour().as_slice());
}

#[test]
fn test_rejects_unrelated_graph() {
    let tour = initial_tour();
    let mut out = Vec::new();
    assert!(ClusterOptimizer::new()
        .solve(&tour, &nine_point_graph(), 0, &mut out)
        .is_err());
}

#[test]
fn test_cut_cluster_out_of_range() {
    let g = gtsp_graph();
    let tour = initial_tour();

    let mut out = vec![1, 2, 3];
    let err = ClusterOptimizer::new().solve(&tour, &g, 6, &mut out).unwrap_err();
    assert!(matches!(err, TourForgeError::InvalidArgument(_)));
    assert_eq!(out, vec![1, 2, 3]);
}

#[test]
fn test_single_cluster() {
    let clustering = Arc::new(Clustering::from_sizes(&[3]).unwrap());
    let g = MatrixGraph::new(3, vec![5, 0, 0, 1, 2, 0, 1, 1, 2], true)
        .unwrap()
        .with_clustering(Arc::clone(&clustering))
        .unwrap();
    let mut tour = GeneralizedTour::from_permutation(vec![0], clustering).unwrap();

    let cost = ClusterOptimizer::new().improve(&mut tour, &g, None).unwrap();

    assert_eq!(cost, 2);
    assert_eq!(tour.tour().as_slice(), &[1]);
}

#[test]
fn test_two_clusters() {
    let clustering = Arc::new(Clustering::from_sizes(&[2, 2]).unwrap());
    let g = PointGraph::from_points(
        &[[0.0, 0.0], [10.0, 0.0], [3.0, 0.0], [20.0, 0.0]],
        Norm::Euclidean,
    )
    .unwrap()
    .with_clustering(Arc::clone(&clustering))
    .unwrap();
    let tour = GeneralizedTour::from_permutation(vec![3, 1], clustering).unwrap();

    let mut out = Vec::new();
    for cut in [0, 1] {
        let cost = ClusterOptimizer::new().solve(&tour, &g, cut, &mut out).unwrap();
        assert_cost_eq(cost, 6.0);
        assert_eq!(out, vec![2, 0]);
    }
}

#[test]
fn test_arena_reset() {
    let mut arena = DynProgArena::<i64>::new(2);
    arena.set(1, 4, 0);
    assert_eq!(arena.cost_to_go(1), 4);
    assert_eq!(arena.best_next(1), 0);

    arena.reset(5);
    assert_eq!(arena.num_vertices(), 5);
    assert_eq!(arena.cost_to_go(1), i64::MAX);
    assert_eq!(arena.best_next(4), usize::MAX);
}
