use super::*;

#[test]
fn test_matrix_mirrors_lower_triangle() {
    let g = MatrixGraph::new(3, vec![0, 1, 2, 3, 0, 4, 5, 6, 0], true).unwrap();

    assert_eq!(g.edge_cost(1, 0), 3);
    assert_eq!(g.edge_cost(0, 1), 3);
    assert_eq!(g.edge_cost(0, 2), 5);
    assert_eq!(g.edge_cost(1, 2), 6);
    assert!(g.is_symmetric());
}

#[test]
fn test_matrix_asymmetric_keeps_entries() {
    let g = MatrixGraph::new(2, vec![0.0, 1.5, 2.5, 0.0], false).unwrap();

    assert_eq!(g.edge_cost(0, 1), 1.5);
    assert_eq!(g.edge_cost(1, 0), 2.5);
    assert!(!g.is_symmetric());
}

#[test]
fn test_matrix_wrong_size() {
    let err = MatrixGraph::new(3, vec![0; 8], true).unwrap_err();
    assert_eq!(
        err,
        TourForgeError::LengthMismatch {
            what: "cost matrix",
            expected: 9,
            actual: 8
        }
    );

    assert!(MatrixGraph::from_rows(vec![vec![0, 1], vec![1]], true).is_err());
}

#[test]
fn test_matrix_accepts_negative_costs() {
    let g = MatrixGraph::new(2, vec![0, -1, -1, 0], true).unwrap();
    assert_eq!(g.edge_cost(0, 1), -1);
}

#[test]
fn test_norms() {
    let a = [1.0, -2.0];
    let b = [4.0, 2.0];

    assert_eq!(Norm::Euclidean.distance(&a, &b), 5.0);
    assert_eq!(Norm::Manhattan.distance(&a, &b), 7.0);
    assert_eq!(Norm::Maximum.distance(&a, &b), 4.0);
}

#[test]
fn test_point_graph_dimensions() {
    let g = PointGraph::new(3, vec![0.0, 0.0, 0.0, 1.0, 2.0, 2.0], Norm::Euclidean).unwrap();
    assert_eq!(g.num_vertices(), 2);
    assert_eq!(g.dim(), 3);
    assert_eq!(g.point(1), &[1.0, 2.0, 2.0]);
    assert_eq!(g.edge_cost(0, 1), 3.0);

    assert!(PointGraph::new(2, vec![0.0, 1.0, 2.0], Norm::Euclidean).is_err());
    assert!(PointGraph::<f64>::new(0, vec![], Norm::Euclidean).is_err());
    assert!(PointGraph::from_points(&[vec![0.0, 1.0], vec![2.0]], Norm::Euclidean).is_err());
}

#[test]
fn test_explicitize_rounds_to_nearest() {
    let g = PointGraph::from_points(&[[0.0, 0.0], [1.0, 1.0], [0.0, 2.5]], Norm::Euclidean)
        .unwrap();
    let m = g.explicitize(1.0).unwrap();

    // sqrt(2) = 1.41, sqrt(3.25) = 1.80
    assert_eq!(m.edge_cost(0, 1), 1);
    assert_eq!(m.edge_cost(1, 2), 2);
    assert_eq!(m.edge_cost(0, 2), 3);
    assert_eq!(m.edge_cost(2, 2), 0);

    let scaled = g.explicitize(100.0).unwrap();
    assert_eq!(scaled.edge_cost(0, 1), 141);
}

#[test]
fn test_explicitize_keeps_clustering() {
    let clustering = Arc::new(Clustering::from_sizes(&[1, 2]).unwrap());
    let g = PointGraph::from_points(&[[0.0], [1.0], [2.0]], Norm::Euclidean)
        .unwrap()
        .with_clustering(Arc::clone(&clustering))
        .unwrap();

    let m = g.explicitize(1.0).unwrap();
    assert!(m.is_clustered());
    assert!(Arc::ptr_eq(m.clustering().unwrap(), &clustering));
    assert_eq!(m.num_clusters(), 2);
}

#[test]
fn test_clustering_must_fit_graph() {
    let clustering = Arc::new(Clustering::from_sizes(&[1, 1]).unwrap());
    let g = PointGraph::from_points(&[[0.0], [1.0], [2.0]], Norm::Euclidean).unwrap();

    assert!(g.with_clustering(clustering).is_err());
}

#[test]
fn test_cluster_means() {
    let clustering = Arc::new(Clustering::new(4, vec![vec![0, 2], vec![1, 3]]).unwrap());
    let g = PointGraph::from_points(
        &[[0.0, 0.0], [10.0, 0.0], [2.0, 2.0], [10.0, 4.0]],
        Norm::Euclidean,
    )
    .unwrap()
    .with_clustering(clustering)
    .unwrap();

    let means = g.cluster_means().unwrap();
    assert_eq!(means.num_vertices(), 2);
    assert!(!means.is_clustered());
    assert_eq!(means.point(0), &[1.0, 1.0]);
    assert_eq!(means.point(1), &[10.0, 2.0]);
}

#[test]
fn test_cluster_means_requires_clustering() {
    let g = PointGraph::from_points(&[[0.0], [1.0]], Norm::Euclidean).unwrap();
    assert!(matches!(
        g.cluster_means(),
        Err(TourForgeError::InvalidOperation(_))
    ));
}
